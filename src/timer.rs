//! Timer seam used for notification dismissal, debounced search and redirects.

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};

/// Something that can sleep without blocking the event loop.
pub trait Timer: Send + Sync {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// [`Timer`] backed by `tokio::time`. Needs a tokio runtime when polled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed()
    }
}

#[cfg(any(test, feature = "testing"))]
mod testing {
    use std::sync::Arc;
    use std::time::Duration;

    use futures::future::{self, BoxFuture, FutureExt};
    use spin::Mutex;

    use super::Timer;

    /// Timer whose sleeps complete immediately.
    ///
    /// Only available with the `testing` feature. Together with the
    /// synchronous test spawner this turns "after the delay" into "after every
    /// event already queued", which is enough to exercise supersession logic.
    /// Requested durations are recorded for assertions.
    #[derive(Clone, Default)]
    pub struct ImmediateTimer {
        requested: Arc<Mutex<Vec<Duration>>>,
    }

    impl ImmediateTimer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn requested(&self) -> Vec<Duration> {
            self.requested.lock().clone()
        }
    }

    impl Timer for ImmediateTimer {
        fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
            self.requested.lock().push(duration);
            future::ready(()).boxed()
        }
    }
}

#[cfg(any(test, feature = "testing"))]
pub use testing::ImmediateTimer;
