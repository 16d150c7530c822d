//! Event emitter and callback handles embedded in page Props.

use std::sync::Arc;

use flume::Sender;

/// Event emitter that can be embedded in Props.
///
/// Clone this handle (or derive [`Callback`]s from it) to let user actions
/// such as a form submit or a button click feed events back into the page
/// runtime.
///
/// `Emitter` wraps a lock-free channel sender, making it cheap to clone
/// and safe to move into effect futures.
///
/// # Example
///
/// ```rust
/// use rest_mvu::{Effect, Emitter, PageLogic};
///
/// enum Event { Refresh }
///
/// #[derive(Clone)]
/// struct Model { refreshes: u32 }
///
/// struct Props { on_refresh: rest_mvu::Callback<()> }
///
/// struct Page;
///
/// impl PageLogic<Event, Model, Props> for Page {
///     fn init(&self, model: Model) -> (Model, Effect<Event>) {
///         (model, Effect::none())
///     }
///
///     fn update(&self, event: Event, model: &Model) -> (Model, Effect<Event>) {
///         match event {
///             Event::Refresh => (Model { refreshes: model.refreshes + 1 }, Effect::none()),
///         }
///     }
///
///     fn view(&self, _model: &Model, emitter: &Emitter<Event>) -> Props {
///         Props { on_refresh: emitter.callback(|_: ()| Event::Refresh) }
///     }
/// }
/// ```
pub struct Emitter<Event: Send>(pub(crate) Sender<Event>);

impl<Event: Send> Clone for Emitter<Event> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<Event: Send + 'static> Emitter<Event> {
    pub(crate) fn new(sender: Sender<Event>) -> Self {
        Self(sender)
    }

    /// Emit an event.
    ///
    /// This queues the event for processing by the runtime. Events emitted
    /// after the runtime is gone are dropped.
    pub fn emit(&self, event: Event) {
        if self.0.send(event).is_err() {
            log::debug!("Dropping event: page runtime has shut down");
        }
    }

    /// Build a callback that maps a user-supplied value to an event and emits it.
    pub fn callback<T, F>(&self, map: F) -> Callback<T>
    where
        T: 'static,
        F: Fn(T) -> Event + Send + Sync + 'static,
    {
        let emitter = self.clone();
        Callback(Arc::new(move |value| emitter.emit(map(value))))
    }
}

/// A user action handle carried by Props.
///
/// Whatever binds the rendered markup to the platform (DOM listeners, a
/// terminal key map, a test) invokes [`Callback::call`] with the raw input.
pub struct Callback<T>(Arc<dyn Fn(T) + Send + Sync>);

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Callback<T> {
    pub fn call(&self, value: T) {
        (self.0)(value)
    }
}

impl Callback<()> {
    /// Shorthand for argument-less actions like "confirm" or "close".
    pub fn trigger(&self) {
        self.call(())
    }
}
