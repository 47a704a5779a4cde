pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod feed;
pub mod models;
pub mod repositories;
pub mod services;

pub use config::Config;
pub use database::{get_db_connection, run_migrations};
pub use error::{FetchError, StoreError};
pub use feed::{DeribitClient, PriceFeed};
pub use models::*;
pub use repositories::price_repository::PriceRepository;
pub use services::ingestion::{run_cycle, CycleReport, IngestionError, SymbolOutcome};
pub use services::price_service::{PriceService, PriceServiceError};
pub use services::scheduler::run_every;
