use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

pub async fn get_db_connection(database_url: &str) -> Result<DatabaseConnection> {
    info!("Connecting to database via Sea-ORM at: {}", redact_url(database_url));
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    // Every pooled connection to `sqlite::memory:` would see its own empty database
    if database_url.contains(":memory:") {
        options.max_connections(1);
    }
    let db = Database::connect(options).await?;
    Ok(db)
}

/// Replace any password in a connection URL with `***`.
pub fn redact_url(database_url: &str) -> String {
    match reqwest::Url::parse(database_url) {
        Ok(mut url) => {
            if url.password().is_some() && url.set_password(Some("***")).is_err() {
                return "<redacted>".to_string();
            }
            url.to_string()
        }
        Err(_) => "<redacted>".to_string(),
    }
}

/// Bring the schema up to date. Safe to call from every process on startup.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None).await?;
    info!("Database migrations applied");
    Ok(())
}
