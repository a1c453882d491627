//! zBANK API Library
//!
//! Account authentication, balance inquiry, deposits and withdrawals over a
//! REST API backed by a relational store.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod common;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod repositories;
pub mod seed;
pub mod services;
pub mod tracing;

use axum::{response::Json, routing::get, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::auth::PinHasher;
use crate::services::AccountService;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub accounts: AccountService,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig, pin_hasher: PinHasher) -> Self {
        let accounts = AccountService::new(db.clone(), pin_hasher);
        Self {
            db,
            config,
            accounts,
        }
    }

    pub fn account_service(&self) -> &AccountService {
        &self.accounts
    }
}

pub type ApiResult<T> = Result<Json<T>, errors::ServiceError>;

/// Versioned API routes, mounted under `/api/v1`
pub fn api_v1_routes() -> Router<AppState> {
    Router::new().nest("/accounts", handlers::accounts::account_routes())
}

/// Full application router: banner, health, v1 API and Swagger UI with
/// request-id and HTTP tracing layers. CORS and compression are left to the
/// binary since they depend on deployment settings.
pub fn build_router(state: AppState) -> Router {
    let db = state.db.clone();

    Router::<AppState>::new()
        .route("/", get(|| async { "zBANK API up" }))
        .nest("/api/v1", api_v1_routes())
        .with_state(state)
        .nest("/health", health::health_routes(db))
        .merge(openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
}
