//! Test context for unified test setup
//!
//! Builds the full application state over a [`MemoryStore`] so tests can seed
//! documents directly and drive the router in-process.

use std::sync::{Arc, Once};
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use ghostshield::{
    config::Settings,
    database::{DatabaseService, DocumentStore, MemoryStore},
    middleware::build_guard,
    server::{router, AppState},
};
use tower::ServiceExt;

pub const OPERATOR_USERNAME: &str = "souhail_boss";
pub const OPERATOR_PASSWORD: &str = "boss_souhail";

static INIT: Once = Once::new();

/// Initialize test logging once per binary
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Settings good enough to build the application
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.session.secret = "test-session-secret-0123456789".to_string();
    settings.operator.username = OPERATOR_USERNAME.to_string();
    settings.operator.password = OPERATOR_PASSWORD.to_string();
    settings
}

/// A response collected into its parts
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    /// `name=value` part of the first Set-Cookie header
    pub fn cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub store: MemoryStore,
    pub state: AppState,
    pub router: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        Self::with_backend(store.clone(), Arc::new(store))
    }

    /// Serve from `backend` while tests seed and inspect through `store`
    pub fn with_backend(store: MemoryStore, backend: Arc<dyn DocumentStore>) -> Self {
        init_test_env();

        let settings = test_settings();
        let guard = build_guard(&settings).expect("test settings build a guard");
        let state = AppState::new(DatabaseService::new(backend), guard);
        let router = router(state.clone());

        Self { store, state, router }
    }

    pub fn db(&self) -> &DatabaseService {
        &self.state.db
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body collects");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
            bytes: bytes.to_vec(),
        }
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(Method::GET).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, path: &str, form: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form.to_string())).unwrap()).await
    }

    /// Log in as the operator and return the session cookie pair
    pub async fn login(&self) -> String {
        let form = format!("username={}&password={}", OPERATOR_USERNAME, OPERATOR_PASSWORD);
        let response = self.post_form("/login", &form, None).await;
        assert_eq!(response.status, StatusCode::FOUND);
        response.cookie().expect("login sets a session cookie")
    }
}
