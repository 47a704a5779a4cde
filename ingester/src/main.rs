use anyhow::Result;
use shared::{get_db_connection, run_every, run_migrations, Config, DeribitClient, PriceRepository};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Deribit price ingester...");

    let config = Config::from_env()?;
    let db = get_db_connection(&config.database_url).await?;
    run_migrations(&db).await?;
    info!("Connected to database");

    let repo = PriceRepository::new(Arc::new(db));
    let feed = DeribitClient::new(config.deribit_api_url.clone(), config.fetch_timeout)?;
    info!(
        "Fetching {} from {} (timeout {:?})",
        config.symbols.join(", "),
        feed.base_url(),
        config.fetch_timeout
    );

    let cycles = run_every(
        config.fetch_interval,
        &feed,
        &repo,
        &config.symbols,
        async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        },
    )
    .await;

    info!("Ingester stopped after {} cycles", cycles);
    Ok(())
}
