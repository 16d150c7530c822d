//! Model-View-Update page controllers for small CRUD front-ends.
//!
//! Every page follows the same loop: fetch JSON from a REST endpoint, render
//! it to markup, let the user submit forms that `POST`/`PATCH`/`DELETE` back,
//! then reload what changed and show a short notification.
//!
//! The [`PageRuntime`] owns the page's view model. [`PageLogic::update`] holds
//! the command handlers: it validates input, returns the request to perform
//! as an [`Effect`] and receives the outcome as a later event.
//! [`PageLogic::view`] renders the model to markup plus the callbacks a
//! [`Renderer`] binds to the controls.
//!
//! Ready-made pages live in [`pages`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::future::Future;
//! use std::pin::Pin;
//!
//! use rest_mvu::pages::movies::{MoviesLogic, MoviesModel, MoviesProps};
//! use rest_mvu::{PageContext, PageRuntime, Renderer, Settings};
//!
//! struct StdoutRenderer;
//!
//! impl Renderer<MoviesProps> for StdoutRenderer {
//!     fn render(&mut self, props: MoviesProps) {
//!         println!("{}", props.markup);
//!     }
//! }
//!
//! # async fn run() {
//! let context = PageContext::http(Settings::default());
//! let spawner = |fut: Pin<Box<dyn Future<Output = ()> + Send>>| {
//!     tokio::spawn(fut);
//! };
//! let mut runtime = PageRuntime::new(
//!     MoviesModel::default(),
//!     MoviesLogic::new(context),
//!     StdoutRenderer,
//!     spawner,
//! );
//! runtime.run().await;
//! # }
//! ```

pub mod api;
pub mod config;
pub mod confirm;
pub mod debounce;
pub mod html;
pub mod input;
pub mod notify;
pub mod pages;
pub mod store;

mod effect;
mod emitter;
mod logic;
mod page;
mod renderer;
mod runtime;
mod timer;

pub use config::Settings;
pub use effect::Effect;
pub use emitter::{Callback, Emitter};
pub use logic::PageLogic;
pub use page::PageContext;
pub use renderer::Renderer;
pub use runtime::{PageRuntime, Spawner};
pub use timer::{Timer, TokioTimer};

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use renderer::TestRenderer;
#[cfg(any(test, feature = "testing"))]
pub use runtime::{create_test_spawner, TestPageDriver, TestPageRuntime};
#[cfg(any(test, feature = "testing"))]
pub use timer::ImmediateTimer;
