//! One fetch-and-store pass over every tracked symbol.

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::feed::PriceFeed;
use crate::repositories::price_repository::PriceRepository;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SymbolOutcome {
    Stored { id: i32, price: f64 },
    FetchFailed { reason: String },
    StoreFailed { reason: String },
}

impl SymbolOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub started_at: i64,
    pub outcomes: BTreeMap<String, SymbolOutcome>,
}

impl CycleReport {
    pub fn stored_count(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_stored()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.stored_count()
    }
}

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("price store rejected all {attempted} writes this cycle: {last_error}")]
    StoreUnavailable { attempted: usize, last_error: String },
}

/// Run one ingestion cycle.
///
/// Fetches for all symbols run concurrently and are all awaited before the
/// report is built. A failure for one symbol never affects another. The only
/// error is a store that refused every write attempted in this cycle.
pub async fn run_cycle(
    feed: &dyn PriceFeed,
    repo: &PriceRepository,
    symbols: &[String],
) -> Result<CycleReport, IngestionError> {
    let started_at = Utc::now().timestamp();
    info!("Starting price fetch cycle for {} symbols", symbols.len());

    let results = join_all(symbols.iter().map(|symbol| ingest_symbol(feed, repo, symbol))).await;

    let mut outcomes = BTreeMap::new();
    let mut attempted = 0;
    let mut store_failures = 0;
    let mut last_store_error = None;
    for (symbol, result) in symbols.iter().zip(results) {
        let outcome = match result {
            Step::Stored { id, price } => {
                attempted += 1;
                SymbolOutcome::Stored { id, price }
            }
            Step::FetchFailed(reason) => SymbolOutcome::FetchFailed { reason },
            Step::StoreFailed(err) => {
                attempted += 1;
                let reason = err.to_string();
                if matches!(err, StoreError::Unavailable(_)) {
                    store_failures += 1;
                    last_store_error = Some(reason.clone());
                }
                SymbolOutcome::StoreFailed { reason }
            }
        };
        outcomes.insert(symbol.clone(), outcome);
    }

    if attempted > 0 && store_failures == attempted {
        return Err(IngestionError::StoreUnavailable {
            attempted,
            last_error: last_store_error.unwrap_or_default(),
        });
    }

    let report = CycleReport {
        started_at,
        outcomes,
    };
    info!(
        "Price fetch cycle finished: {} stored, {} failed",
        report.stored_count(),
        report.failed_count()
    );
    Ok(report)
}

enum Step {
    Stored { id: i32, price: f64 },
    FetchFailed(String),
    StoreFailed(StoreError),
}

async fn ingest_symbol(feed: &dyn PriceFeed, repo: &PriceRepository, symbol: &str) -> Step {
    let price = match feed.fetch_index_price(symbol).await {
        Ok(price) => price,
        Err(e) => {
            warn!("Failed to fetch {} price: {}", symbol, e);
            return Step::FetchFailed(e.to_string());
        }
    };

    // Timestamp is the ingestion moment, not anything the feed reports
    match repo.append(symbol, price, Utc::now().timestamp()).await {
        Ok(sample) => {
            info!("✅ Saved {} price: {} (id {})", symbol, sample.price, sample.id);
            Step::Stored {
                id: sample.id,
                price: sample.price,
            }
        }
        Err(e) => {
            warn!("Failed to store {} price {}: {}", symbol, price, e);
            Step::StoreFailed(e)
        }
    }
}
