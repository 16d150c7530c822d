//! The concrete pages, one module per backend.
//!
//! Each page provides a `…Model` (its view model), a `…Event` enum, the
//! `…Props` handed to the [`Renderer`](crate::Renderer) and a `…Logic`
//! implementing [`PageLogic`](crate::PageLogic).

pub mod blog;
pub mod kanban;
pub mod library;
pub mod movies;
pub mod notes;
pub mod shop;
