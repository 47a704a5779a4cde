pub mod deribit;

use async_trait::async_trait;

use crate::error::FetchError;

pub use deribit::DeribitClient;

/// Source of the current index price for a symbol.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn fetch_index_price(&self, symbol: &str) -> Result<f64, FetchError>;
}
