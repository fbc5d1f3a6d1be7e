//! API server entry point

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use infra_db::{create_pool, DatabaseConfig, PostgresLedger};
use interface_api::config::ApiConfig;
use interface_api::summarizer::FallbackSummarizer;
use interface_api::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let pool = create_pool(DatabaseConfig::new(config.database_url.clone())).await?;
    let state = AppState {
        ledger: Arc::new(PostgresLedger::new(pool)),
        summarizer: Arc::new(FallbackSummarizer),
        config: config.clone(),
    };

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(config.server_addr()).await?;
    info!(addr = %config.server_addr(), "API server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
