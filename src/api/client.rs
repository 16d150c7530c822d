use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ApiRequest, ApiResponse, Error, Method, Result, Transport};

/// Typed access to the REST endpoints of one backend.
///
/// The client never retries and keeps no state besides the transport, so
/// clones are cheap and every call is independent.
#[derive(Clone)]
pub struct ResourceClient {
    transport: Arc<dyn Transport>,
}

impl ResourceClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// `GET path?query` and decode the body.
    pub fn fetch_collection<T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<T>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = query
            .iter()
            .fold(ApiRequest::get(path), |request, (key, value)| {
                request.with_query(key, *value)
            });
        self.send(request)
    }

    /// Issue a mutating request with an optional JSON body.
    pub fn submit<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> impl Future<Output = Result<T>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let mut request = ApiRequest::new(method, path);
        request.body = body;
        self.send(request)
    }

    /// Send a prepared request and decode the body.
    pub fn send<T>(&self, request: ApiRequest) -> impl Future<Output = Result<T>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        log::debug!("{request}");
        let label = request.to_string();
        let response = self.transport.send(request);
        async move {
            let response = response.await.inspect_err(|err| {
                log::warn!("{label} failed: {err}");
            })?;
            into_json(&label, response)
        }
    }
}

fn into_json<T>(label: &str, response: ApiResponse) -> Result<T>
where
    T: DeserializeOwned,
{
    // ensure we've got 2xx status
    if response.is_success() {
        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body).map_err(|err| {
            log::warn!("{label} returned an unexpected body: {err}");
            Error::Transport(format!("unexpected response body: {err}"))
        })
    } else {
        let detail = serde_json::from_str::<Value>(&response.body)
            .ok()
            .and_then(|body| body.get("detail").and_then(Value::as_str).map(ToOwned::to_owned));
        log::warn!(
            "{label} was rejected with status {}: {}",
            response.status,
            detail.as_deref().unwrap_or("no detail")
        );
        Err(Error::RemoteRejection {
            status: response.status,
            detail,
        })
    }
}
