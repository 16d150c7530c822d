//! Declarative effect system for describing deferred event processing.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{self, BoxFuture, FutureExt};

use crate::{Emitter, Timer};

type Job<Event> = Box<dyn FnOnce(Emitter<Event>) -> BoxFuture<'static, ()> + Send>;

/// Declarative description of work that eventually produces events.
///
/// Effects are returned from [`PageLogic::init`](crate::PageLogic::init)
/// and [`PageLogic::update`](crate::PageLogic::update) alongside the new
/// model. The runtime spawns every job of an effect independently, so a
/// pending timer never holds back a network call of the same batch.
///
/// # Example
///
/// ```rust
/// use rest_mvu::Effect;
///
/// enum Event {
///     Reload,
///     Loaded(Vec<String>),
/// }
///
/// // Trigger a follow-up event
/// let effect = Effect::just(Event::Reload);
///
/// // Resolve a future into an event
/// let effect = Effect::task(async { Event::Loaded(vec!["cached".to_string()]) });
///
/// // Combine multiple effects
/// let effect = Effect::batch(vec![Effect::just(Event::Reload), effect]);
/// assert!(!effect.is_none());
///
/// // No side effects
/// let effect: Effect<Event> = Effect::none();
/// assert!(effect.is_none());
/// ```
pub struct Effect<Event: Send>(Vec<Job<Event>>);

impl<Event: Send + 'static> Effect<Event> {
    /// An effect without any work.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// Emit a single event right away.
    pub fn just(event: Event) -> Self {
        Self::from_job(move |emitter| {
            emitter.emit(event);
            future::ready(()).boxed()
        })
    }

    /// Await a future and emit the event it resolves to.
    ///
    /// This is how requests leave the page: the future performs the call
    /// and maps its outcome to an event.
    pub fn task<F>(future: F) -> Self
    where
        F: Future<Output = Event> + Send + 'static,
    {
        Self::from_job(move |emitter| {
            async move {
                emitter.emit(future.await);
            }
            .boxed()
        })
    }

    /// Emit `event` once `delay` has elapsed on `timer`.
    pub fn after(timer: &Arc<dyn Timer>, delay: Duration, event: Event) -> Self {
        let sleep = timer.sleep(delay);
        Self::task(async move {
            sleep.await;
            event
        })
    }

    /// Combine multiple effects into a single effect.
    pub fn batch(effects: Vec<Effect<Event>>) -> Self {
        Self(effects.into_iter().flat_map(|effect| effect.0).collect())
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    /// Turn the effect into one future per job, ready to be spawned.
    pub fn into_futures(self, emitter: &Emitter<Event>) -> Vec<BoxFuture<'static, ()>> {
        self.0.into_iter().map(|job| job(emitter.clone())).collect()
    }

    fn from_job<J>(job: J) -> Self
    where
        J: FnOnce(Emitter<Event>) -> BoxFuture<'static, ()> + Send + 'static,
    {
        Self(vec![Box::new(job)])
    }
}
