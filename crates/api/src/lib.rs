//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for income statements and health checks
//! - JSON error responses built from `AppError`

pub mod error;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use chrono_tz::Tz;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use lodgebook_core::reports::{IncomeStatementService, ReportOptions};
use lodgebook_shared::AppConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Income statement engine.
    pub reports: Arc<IncomeStatementService>,
    /// Timezone whose calendar date is "today".
    pub timezone: Tz,
}

impl AppState {
    /// Builds the state from loaded configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            reports: Arc::new(IncomeStatementService::new(ReportOptions::from(
                &config.reporting,
            ))),
            timezone: config.reporting.timezone,
        }
    }

    /// Today's date in the configured timezone.
    #[must_use]
    pub fn today(&self) -> chrono::NaiveDate {
        chrono::Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
