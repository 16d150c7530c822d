//! Page logic trait defining the MVU contract.

use crate::{Effect, Emitter};

/// Page logic: the command handlers and the renderer of one page.
///
/// Implementations provide three functions:
/// - [`init`](Self::init): issue the initial loads for the page
/// - [`update`](Self::update): handle one event, producing the next model
///   and the requests to perform
/// - [`view`](Self::view): derive Props (markup plus action callbacks) from
///   the model without mutating it
///
/// The model is owned by the [`PageRuntime`](crate::PageRuntime) and only
/// ever lent to these functions.
pub trait PageLogic<Event: Send, Model, Props> {
    /// Prepare the freshly created model and return the page-load effects.
    ///
    /// This is called once when the runtime starts.
    fn init(&self, model: Model) -> (Model, Effect<Event>);

    /// Reduce an event to an updated model and side effects.
    ///
    /// All state changes happen here. Network calls are never made directly;
    /// they are returned as effects whose outcome arrives as a later event.
    fn update(&self, event: Event, model: &Model) -> (Model, Effect<Event>);

    /// Reduce to Props from the current model.
    ///
    /// The provided [`Emitter`] allows Props to contain callbacks that
    /// trigger new events.
    fn view(&self, model: &Model, emitter: &Emitter<Event>) -> Props;
}
