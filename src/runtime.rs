//! The page runtime that owns the view model and orchestrates the event loop.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

use flume::Receiver;

use crate::{Effect, Emitter, PageLogic, Renderer};

/// A spawner trait for executing futures on an async runtime.
///
/// Effects (requests, timers) are handed to the spawner and run detached
/// from the event loop; their outcomes come back as events.
///
/// Function pointers and closures automatically implement this trait via the blanket implementation.
pub trait Spawner {
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>);
}

impl<F> Spawner for F
where
    F: Fn(Pin<Box<dyn Future<Output = ()> + Send>>),
{
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>) {
        self(future)
    }
}

/// The page controller.
///
/// It:
/// 1. Initializes the model and the page-load effects via [`PageLogic::init`]
/// 2. Processes events through [`PageLogic::update`]
/// 3. Reduces the model to Props via [`PageLogic::view`]
/// 4. Delivers Props to the [`Renderer`]
///
/// The model lives here for the lifetime of the page and is passed by
/// reference to the logic; nothing else can reach it. Events are processed
/// one at a time in arrival order, so a response that arrives while another
/// event is handled simply waits in the queue.
///
/// For tests with manual control, use [`TestPageRuntime`] with a
/// [`crate::TestRenderer`].
pub struct PageRuntime<Event, Model, Props, Logic, Render, Spawn>
where
    Event: Send + 'static,
    Model: Clone,
    Logic: PageLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    logic: Logic,
    renderer: Render,
    event_receiver: Receiver<Event>,
    model: Model,
    emitter: Emitter<Event>,
    spawner: Spawn,
    _props: PhantomData<Props>,
}

impl<Event, Model, Props, Logic, Render, Spawn> PageRuntime<Event, Model, Props, Logic, Render, Spawn>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: PageLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    /// Create a new runtime.
    ///
    /// Nothing is loaded or rendered until [`PageRuntime::run`] is called.
    pub fn new(init_model: Model, logic: Logic, renderer: Render, spawner: Spawn) -> Self {
        let (event_sender, event_receiver) = flume::unbounded();
        let emitter = Emitter::new(event_sender);

        PageRuntime {
            logic,
            renderer,
            event_receiver,
            model: init_model,
            emitter,
            spawner,
            _props: PhantomData,
        }
    }

    /// A handle for feeding events from outside the rendered Props,
    /// e.g. from a router or a global keyboard shortcut.
    pub fn emitter(&self) -> Emitter<Event> {
        self.emitter.clone()
    }

    /// Initialize the page and run the event processing loop.
    ///
    /// - Uses [`PageLogic::init`] to prepare the model and spawn the page-load effects.
    /// - Renders the initial Props.
    /// - Processes events until the channel closes, which in practice is
    ///   the lifetime of the page.
    pub async fn run(&mut self) {
        self.start();

        while let Ok(event) = self.event_receiver.recv_async().await {
            self.step(event);
        }
    }

    fn start(&mut self) {
        let (init_model, init_effect) = self.logic.init(self.model.clone());

        let initial_props = self.logic.view(&init_model, &self.emitter);
        self.renderer.render(initial_props);
        self.model = init_model;

        self.spawn(init_effect);
    }

    fn step(&mut self, event: Event) {
        let (new_model, effect) = self.logic.update(event, &self.model);

        let props = self.logic.view(&new_model, &self.emitter);
        self.renderer.render(props);

        self.model = new_model;

        self.spawn(effect);
    }

    fn spawn(&self, effect: Effect<Event>) {
        for future in effect.into_futures(&self.emitter) {
            self.spawner.spawn(future);
        }
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test spawner function that executes futures synchronously.
pub fn test_spawner_fn(fut: Pin<Box<dyn Future<Output = ()> + Send>>) {
    futures::executor::block_on(fut);
}

#[cfg(any(test, feature = "testing"))]
/// Creates a test spawner that executes futures synchronously.
///
/// Futures are driven to completion as soon as they are spawned, so the
/// events they emit are queued before the next event is processed. Pair it
/// with a transport and a timer that resolve immediately.
pub fn create_test_spawner() -> fn(Pin<Box<dyn Future<Output = ()> + Send>>) {
    test_spawner_fn
}

#[cfg(any(test, feature = "testing"))]
/// Test runtime driver for manual event processing control.
///
/// Only available with the `testing` feature or during tests.
///
/// Returned by [`TestPageRuntime::run`].
pub struct TestPageDriver<Event, Model, Props, Logic, Render, Spawn>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: PageLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    runtime: PageRuntime<Event, Model, Props, Logic, Render, Spawn>,
}

#[cfg(any(test, feature = "testing"))]
impl<Event, Model, Props, Logic, Render, Spawn> TestPageDriver<Event, Model, Props, Logic, Render, Spawn>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: PageLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    /// Process all queued events, including those queued while processing.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.runtime.event_receiver.try_recv() {
            self.runtime.step(event);
        }
    }

    /// Queue an event as if it came from outside the rendered Props.
    pub fn emit(&self, event: Event) {
        self.runtime.emitter.emit(event);
    }

    /// The model as it stands after the last processed event.
    pub fn model(&self) -> &Model {
        &self.runtime.model
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test runtime for pages with manual event processing control.
///
/// Only available with the `testing` feature or during tests.
///
/// Unlike [`PageRuntime`], this runtime does not process events on its
/// own. Tests call [`process_events`](TestPageDriver::process_events) on the
/// returned driver, which gives precise control over interleavings such as
/// several keystrokes arriving before a debounce timer fires.
pub struct TestPageRuntime<Event, Model, Props, Logic, Render, Spawn>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: PageLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    runtime: PageRuntime<Event, Model, Props, Logic, Render, Spawn>,
}

#[cfg(any(test, feature = "testing"))]
impl<Event, Model, Props, Logic, Render, Spawn> TestPageRuntime<Event, Model, Props, Logic, Render, Spawn>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: PageLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    pub fn new(init_model: Model, logic: Logic, renderer: Render, spawner: Spawn) -> Self {
        TestPageRuntime {
            runtime: PageRuntime::new(init_model, logic, renderer, spawner),
        }
    }

    /// Initialize the page and render the initial Props.
    ///
    /// Page-load effects run immediately with the test spawner, so their
    /// events are already queued when this returns.
    pub fn run(mut self) -> TestPageDriver<Event, Model, Props, Logic, Render, Spawn> {
        self.runtime.start();
        TestPageDriver {
            runtime: self.runtime,
        }
    }
}
