//! Lodgebook API Server
//!
//! Main entry point for the income statement service.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lodgebook_api::{AppState, create_router};
use lodgebook_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lodgebook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    info!(
        currency = %config.reporting.currency,
        timezone = %config.reporting.timezone,
        tolerance = %config.reporting.reconciliation_tolerance,
        "Reporting configured"
    );

    // Create application state and router
    let state = AppState::from_config(&config);
    let app = create_router(state, config.server.body_limit_bytes);

    // Start server
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
