use std::sync::Arc;
use sea_orm::prelude::DatabaseConnection;
use thiserror::Error;

use crate::error::StoreError;
use crate::models::{PriceSample, TimeRange};
use crate::repositories::price_repository::PriceRepository;

#[derive(Error, Debug)]
pub enum PriceServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read side used by the HTTP layer. Turns an empty store result into `NotFound`.
#[derive(Clone)]
pub struct PriceService {
    repo: PriceRepository,
}

impl PriceService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self::from_repository(PriceRepository::new(db))
    }

    pub fn from_repository(repo: PriceRepository) -> Self {
        Self { repo }
    }

    /// Every sample for `ticker`, newest first
    pub async fn all_prices(&self, ticker: &str) -> Result<Vec<PriceSample>, PriceServiceError> {
        let prices = self.repo.query_all(ticker).await?;
        if prices.is_empty() {
            return Err(PriceServiceError::NotFound(format!(
                "No prices found for ticker: {}",
                ticker
            )));
        }
        Ok(prices)
    }

    pub async fn latest_price(&self, ticker: &str) -> Result<PriceSample, PriceServiceError> {
        self.repo.query_latest(ticker).await?.ok_or_else(|| {
            PriceServiceError::NotFound(format!("No price found for ticker: {}", ticker))
        })
    }

    pub async fn prices_in_range(
        &self,
        ticker: &str,
        range: TimeRange,
    ) -> Result<Vec<PriceSample>, PriceServiceError> {
        let prices = self.repo.query_range(ticker, range).await?;
        if prices.is_empty() {
            return Err(PriceServiceError::NotFound(
                "No prices found for specified criteria".to_string(),
            ));
        }
        Ok(prices)
    }
}
