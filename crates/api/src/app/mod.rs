//! HTTP API application wiring (Axum router + shared state).
//!
//! - `routes/`: HTTP handlers, one file per area
//! - `dto.rs`: request-side helpers for query strings and loose JSON bodies
//! - `errors.rs`: the `{message}` error contract

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

use packstore_auth::AdminCapability;
use packstore_catalog::{CatalogStore, InMemoryCatalogStore, MockPaymentProcessor, PaymentProcessor, StoreError};

use crate::config::ApiConfig;
use crate::middleware::{self, AuthState};

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared handler state. Owned by the process entry point and injected here.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub payments: Arc<dyn PaymentProcessor>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, payments: Arc<dyn PaymentProcessor>) -> Self {
        Self { store, payments }
    }

    /// Empty in-memory catalog with the mock payment processor.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryCatalogStore::new()), Arc::new(MockPaymentProcessor))
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, StoreError> {
        let store = if config.seed_demo_catalog {
            InMemoryCatalogStore::with_demo_catalog()?
        } else {
            InMemoryCatalogStore::new()
        };
        tracing::info!(packs = store.len()?, "catalog ready");
        Ok(Self::new(Arc::new(store), Arc::new(MockPaymentProcessor)))
    }
}

/// Build the full HTTP router.
pub fn build_app(state: AppState, admin: AdminCapability) -> Router {
    let auth_state = AuthState {
        admin: Arc::new(admin),
    };

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router(auth_state))
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_log))
                .layer(CatchPanicLayer::custom(routes::system::panic_response))
                .layer(Extension(state)),
        )
}

/// Router wired from configuration: seeded store, mock payments, admin secret.
pub fn build_app_from_config(config: &ApiConfig) -> Result<Router, StoreError> {
    let state = AppState::from_config(config)?;
    Ok(build_app(state, config.admin_capability()))
}
