//! HTTP API Layer
//!
//! This crate provides the REST API for the financial analysis system
//! using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one endpoint per report/analysis operation
//! - **Middleware**: JWT authentication and request audit logging
//! - **DTOs**: request/response shapes, including the outcome mapping
//!   that keeps "period not found" and "no balance data" distinguishable
//! - **Ports**: the ledger and summarizer collaborators arrive as trait
//!   objects, so tests run against in-memory fakes
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod summarizer;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::{LedgerPort, Summarizer};

use crate::config::ApiConfig;
use crate::handlers::{analysis, auth as auth_handlers, health, periods, reports};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn LedgerPort>,
    pub summarizer: Arc<dyn Summarizer>,
    pub config: ApiConfig,
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/v1/auth/login", post(auth_handlers::login));

    // Analysis routes
    let analysis_routes = Router::new()
        .route("/vertical/:year", get(analysis::vertical))
        .route("/horizontal", get(analysis::horizontal))
        .route("/ratios/:year", get(analysis::ratios))
        .route("/sources-uses", get(analysis::sources_uses))
        .route("/cashflow/:year", get(analysis::cashflow))
        .route("/dupont/:year", get(analysis::dupont))
        .route("/proforma/:year", get(analysis::proforma));

    // Protected API routes
    let api_routes = Router::new()
        .route("/periods", get(periods::list_periods))
        .route("/reports/:year", get(reports::get_report))
        .nest("/analysis", analysis_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
