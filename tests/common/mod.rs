#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use zbank_api::{
    auth::{PinHashConfig, PinHasher},
    config::AppConfig,
    db::{self, DbConfig},
    services::accounts::{AccountSnapshot, CreateAccountInput},
    services::AccountService,
    AppState,
};

/// Helper harness for spinning up an application state backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.seed_sample_data = Some(false);

        let pool = db::establish_connection_with_config(&DbConfig::sqlite_memory())
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let hasher =
            PinHasher::new(PinHashConfig::insecure_fast()).expect("valid test hash parameters");
        let state = AppState::new(Arc::new(pool), cfg, hasher);
        let router = zbank_api::build_router(state.clone());

        Self { router, state }
    }

    pub fn accounts(&self) -> &AccountService {
        self.state.account_service()
    }

    /// Opens an account directly through the service.
    pub async fn open_account(
        &self,
        account_number: &str,
        pin: &str,
        balance: Option<Decimal>,
    ) -> AccountSnapshot {
        self.accounts()
            .create_account(CreateAccountInput {
                account_number: account_number.to_string(),
                pin: pin.to_string(),
                balance,
                account_holder_name: Some("Test User".to_string()),
            })
            .await
            .expect("open test account")
    }

    /// Send a request against the router.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        self.request_with_headers(method, uri, body, &[]).await
    }

    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.send(request).await
    }

    /// Send a request with a raw body, for malformed-payload cases.
    pub async fn request_raw(&self, method: Method, uri: &str, raw: &'static str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(raw))
            .expect("failed to build request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is json")
}
