use sea_orm::{prelude::*, ActiveValue, QueryOrder, Select};
use std::sync::Arc;

use crate::entity::crypto_prices;
use crate::error::StoreError;
use crate::models::{PriceSample, TimeRange};

/// Append-only store of price samples.
///
/// Reads order by `timestamp` descending, then `id` descending, so samples that
/// share a timestamp come back newest insertion first.
#[derive(Clone)]
pub struct PriceRepository {
    db: Arc<DatabaseConnection>,
}

impl PriceRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Persist one sample and return it with its assigned id.
    pub async fn append(
        &self,
        ticker: &str,
        price: f64,
        timestamp: i64,
    ) -> Result<PriceSample, StoreError> {
        if ticker.trim().is_empty() {
            return Err(StoreError::InvalidSample("empty ticker".to_string()));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(StoreError::InvalidSample(format!(
                "price must be finite and non-negative, got {}",
                price
            )));
        }

        let sample = crypto_prices::ActiveModel {
            ticker: ActiveValue::Set(ticker.to_string()),
            price: ActiveValue::Set(price),
            timestamp: ActiveValue::Set(timestamp),
            ..Default::default()
        };
        // Single INSERT, so readers see the row either fully or not at all
        let result = crypto_prices::Entity::insert(sample)
            .exec(self.db.as_ref())
            .await?;

        Ok(PriceSample {
            id: result.last_insert_id,
            ticker: ticker.to_string(),
            price,
            timestamp,
        })
    }

    pub async fn query_all(&self, ticker: &str) -> Result<Vec<PriceSample>, StoreError> {
        self.query_range(ticker, TimeRange::default()).await
    }

    pub async fn query_latest(&self, ticker: &str) -> Result<Option<PriceSample>, StoreError> {
        let latest = Self::newest_first(ticker).one(self.db.as_ref()).await?;
        Ok(latest.map(PriceSample::from))
    }

    /// Samples with `start <= timestamp <= end`; a missing bound leaves that side open.
    pub async fn query_range(
        &self,
        ticker: &str,
        range: TimeRange,
    ) -> Result<Vec<PriceSample>, StoreError> {
        let mut query = Self::newest_first(ticker);
        if let Some(start) = range.start {
            query = query.filter(crypto_prices::Column::Timestamp.gte(start));
        }
        if let Some(end) = range.end {
            query = query.filter(crypto_prices::Column::Timestamp.lte(end));
        }

        let rows = query.all(self.db.as_ref()).await?;
        Ok(rows.into_iter().map(PriceSample::from).collect())
    }

    fn newest_first(ticker: &str) -> Select<crypto_prices::Entity> {
        crypto_prices::Entity::find()
            .filter(crypto_prices::Column::Ticker.eq(ticker))
            .order_by_desc(crypto_prices::Column::Timestamp)
            .order_by_desc(crypto_prices::Column::Id)
    }
}
