use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures::{future, FutureExt};
use rest_mvu::api::{self, ApiRequest, ApiResponse, Method, MockTransport, ResourceClient};
use rest_mvu::notify::Notification;
use rest_mvu::pages::blog::{ModerationProps, PostProps, PostsProps};
use rest_mvu::pages::kanban::KanbanProps;
use rest_mvu::pages::library::{BooksProps, LoansProps, MembersProps};
use rest_mvu::pages::movies::MoviesProps;
use rest_mvu::pages::notes::NotesProps;
use rest_mvu::pages::shop::{CartProps, ProductsProps};
use rest_mvu::{
    create_test_spawner, ImmediateTimer, PageContext, PageLogic, Settings, TestPageDriver,
    TestPageRuntime, TestRenderer,
};
use serde::Serialize;
use serde_json::json;
use spin::Mutex;

pub(crate) type TestSpawner = fn(Pin<Box<dyn Future<Output = ()> + Send>>);

type Router = dyn Fn(&ApiRequest) -> api::Result<ApiResponse> + Send + Sync;

/// In-memory stand-in for one backend.
///
/// Every request goes through a single router closure and is recorded, so
/// tests can assert on exactly what left the page, including that nothing
/// did.
#[derive(Clone)]
pub(crate) struct FakeBackend {
    router: Arc<Router>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl FakeBackend {
    pub(crate) fn new(router: impl Fn(&ApiRequest) -> ApiResponse + Send + Sync + 'static) -> Self {
        Self::fallible(move |request| Ok(router(request)))
    }

    /// A backend whose router may also fail below HTTP, like a dropped connection.
    pub(crate) fn fallible(
        router: impl Fn(&ApiRequest) -> api::Result<ApiResponse> + Send + Sync + 'static,
    ) -> Self {
        Self {
            router: Arc::new(router),
            requests: Arc::default(),
        }
    }

    pub(crate) fn client(&self) -> ResourceClient {
        let router = self.router.clone();
        let requests = self.requests.clone();

        let mut transport = MockTransport::new();
        transport.expect_send().returning(move |request| {
            let response = router(&request);
            requests.lock().push(request);
            future::ready(response).boxed()
        });
        ResourceClient::new(transport)
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method && request.path == path)
            .collect()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

pub(crate) fn ok<T: Serialize>(body: &T) -> ApiResponse {
    ApiResponse::json(200, body)
}

pub(crate) fn created() -> ApiResponse {
    ApiResponse::json(201, &json!({ "ok": true }))
}

pub(crate) fn rejected(status: u16, detail: &str) -> ApiResponse {
    ApiResponse::json(status, &json!({ "detail": detail }))
}

pub(crate) fn unexpected(request: &ApiRequest) -> ApiResponse {
    rejected(404, &format!("no route for {request}"))
}

pub(crate) struct PageTest<Event, Model, Props, Logic>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: PageLogic<Event, Model, Props>,
{
    pub(crate) driver: TestPageDriver<Event, Model, Props, Logic, TestRenderer<Props>, TestSpawner>,
    pub(crate) renders: TestRenderer<Props>,
    pub(crate) backend: FakeBackend,
    pub(crate) timer: ImmediateTimer,
}

/// Start a page against `backend` and run its page-load requests.
pub(crate) fn start_page<Event, Model, Props, Logic>(
    backend: &FakeBackend,
    model: Model,
    logic: impl FnOnce(PageContext) -> Logic,
) -> PageTest<Event, Model, Props, Logic>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: PageLogic<Event, Model, Props>,
{
    let _ = env_logger::builder().is_test(true).try_init();

    let timer = ImmediateTimer::new();
    let context = PageContext::new(backend.client(), Arc::new(timer.clone()), Settings::default());
    let renders = TestRenderer::new();

    let mut driver =
        TestPageRuntime::new(model, logic(context), renders.clone(), create_test_spawner()).run();
    driver.process_events();

    PageTest {
        driver,
        renders,
        backend: backend.clone(),
        timer,
    }
}

/// Props that carry the page notification.
pub(crate) trait NotifyingProps {
    fn notification(&self) -> Option<&Notification>;
}

macro_rules! notifying_props {
    ($($props:ty),* $(,)?) => {
        $(
            impl NotifyingProps for $props {
                fn notification(&self) -> Option<&Notification> {
                    self.notification.as_ref()
                }
            }
        )*
    };
}

notifying_props!(
    BooksProps,
    MembersProps,
    LoansProps,
    ProductsProps,
    CartProps,
    PostsProps,
    PostProps,
    ModerationProps,
    MoviesProps,
    KanbanProps,
    NotesProps,
);

/// Every notification shown so far, in order.
///
/// The immediate timer dismisses notifications within the same
/// `process_events` call, so the latest render alone is not enough.
pub(crate) fn shown_notifications<P: NotifyingProps>(renders: &TestRenderer<P>) -> Vec<Notification> {
    renders.with_renders(|renders| {
        let mut shown: Vec<Notification> = Vec::new();
        let mut previous: Option<&Notification> = None;
        for notification in renders.iter().map(NotifyingProps::notification) {
            if let Some(current) = notification {
                if previous != Some(current) {
                    shown.push(current.clone());
                }
            }
            previous = notification;
        }
        shown
    })
}

pub(crate) fn shown_messages<P: NotifyingProps>(renders: &TestRenderer<P>) -> Vec<String> {
    shown_notifications(renders)
        .into_iter()
        .map(|notification| notification.message)
        .collect()
}

pub(crate) fn connection_refused() -> api::Result<ApiResponse> {
    Err(api::Error::Transport("connection refused".into()))
}
