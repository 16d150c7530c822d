//! Plumbing shared by all page command handlers.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::{
    api::{self, ApiRequest, ResourceClient},
    input::ValidationError,
    notify::{NotificationTicket, Notifier, Severity},
    store::{RequestToken, Slice},
    Effect, Settings, Timer, TokioTimer,
};

/// Everything a page needs to talk to the outside world.
#[derive(Clone)]
pub struct PageContext {
    client: ResourceClient,
    timer: Arc<dyn Timer>,
    settings: Settings,
}

impl PageContext {
    pub fn new(client: ResourceClient, timer: Arc<dyn Timer>, settings: Settings) -> Self {
        Self {
            client,
            timer,
            settings,
        }
    }

    /// Production wiring: HTTP against `settings.api_base_url`, tokio timers.
    pub fn http(settings: Settings) -> Self {
        let client = ResourceClient::new(api::HttpTransport::new(settings.api_base_url.clone()));
        Self::new(client, Arc::new(TokioTimer), settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Perform `request` and map its decoded outcome to an event.
    pub fn request<T, Event, F>(&self, request: ApiRequest, done: F) -> Effect<Event>
    where
        T: DeserializeOwned + Send + 'static,
        Event: Send + 'static,
        F: FnOnce(api::Result<T>) -> Event + Send + 'static,
    {
        let response = self.client.send::<T>(request);
        Effect::task(async move { done(response.await) })
    }

    /// Like [`request`](Self::request) for a body that was built from user
    /// input and may fail to encode.
    pub fn try_request<T, Event, F>(&self, request: api::Result<ApiRequest>, done: F) -> Effect<Event>
    where
        T: DeserializeOwned + Send + 'static,
        Event: Send + 'static,
        F: FnOnce(api::Result<T>) -> Event + Send + 'static,
    {
        match request {
            Ok(request) => self.request(request, done),
            Err(err) => Effect::just(done(Err(err))),
        }
    }

    /// Emit `event` after `delay`.
    pub fn after<Event: Send + 'static>(&self, delay: Duration, event: Event) -> Effect<Event> {
        Effect::after(&self.timer, delay, event)
    }

    /// Show a notification and schedule its dismissal.
    pub fn notify<Event: Send + 'static>(
        &self,
        notifier: &mut Notifier,
        message: impl Into<String>,
        severity: Severity,
        expired: fn(NotificationTicket) -> Event,
    ) -> Effect<Event> {
        let ticket = notifier.notify(message, severity);
        self.after(self.settings.notification_timeout, expired(ticket))
    }

    /// Report a rejected or failed command.
    pub fn failed<Event: Send + 'static>(
        &self,
        notifier: &mut Notifier,
        err: &api::Error,
        fallback: &str,
        expired: fn(NotificationTicket) -> Event,
    ) -> Effect<Event> {
        self.notify(notifier, err.user_message(fallback), Severity::Error, expired)
    }

    /// Report input that failed validation; no request has been issued.
    pub fn invalid<Event: Send + 'static>(
        &self,
        notifier: &mut Notifier,
        err: &ValidationError,
        expired: fn(NotificationTicket) -> Event,
    ) -> Effect<Event> {
        log::debug!("Rejected input: {err}");
        self.notify(notifier, err.to_string(), Severity::Error, expired)
    }

    /// Apply the outcome of a load to its slice.
    ///
    /// Failures of the latest load are shown to the user; outcomes of
    /// superseded loads are dropped silently.
    pub fn loaded<T, Event: Send + 'static>(
        &self,
        slice: &mut Slice<T>,
        notifier: &mut Notifier,
        token: RequestToken,
        result: api::Result<T>,
        what: &str,
        expired: fn(NotificationTicket) -> Event,
    ) -> Effect<Event> {
        match result {
            Ok(value) => {
                slice.apply(token, value);
                Effect::none()
            }
            Err(err) if slice.is_current(token) => {
                let message = format!(
                    "Error loading {what}: {}",
                    err.user_message(&format!("could not fetch {what}"))
                );
                self.notify(notifier, message, Severity::Error, expired)
            }
            Err(err) => {
                log::debug!("Ignoring failure of a superseded {what} load: {err}");
                Effect::none()
            }
        }
    }
}
