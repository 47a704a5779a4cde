use anyhow::Result;
use shared::{get_db_connection, run_migrations, Config, PriceService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Deribit price tracker API server...");

    let config = Config::from_env()?;
    let db = get_db_connection(&config.database_url).await?;
    run_migrations(&db).await?;
    info!("Connected to database");

    let price_service = PriceService::new(Arc::new(db));
    let app = routes::router(Arc::new(AppState::new(&config, price_service)));

    let listener = tokio::net::TcpListener::bind(&config.api_bind_addr).await?;
    info!("API server listening on http://{}", config.api_bind_addr);
    info!("Tracking tickers: {}", config.symbols.join(", "));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
