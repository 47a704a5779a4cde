use serde::{Deserialize, Serialize};

use crate::entity::crypto_prices;

/// One stored index-price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub id: i32,
    pub ticker: String,
    pub price: f64,
    pub timestamp: i64,
}

impl From<crypto_prices::Model> for PriceSample {
    fn from(model: crypto_prices::Model) -> Self {
        Self {
            id: model.id,
            ticker: model.ticker,
            price: model.price,
            timestamp: model.timestamp,
        }
    }
}

/// Optional inclusive bounds on `timestamp`, in UNIX seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TimeRange {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }
}

