//! Deribit public index-price client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::PriceFeed;
use crate::error::FetchError;

#[derive(Debug, Deserialize)]
struct IndexPriceResponse {
    result: Option<IndexPriceResult>,
}

#[derive(Debug, Deserialize)]
struct IndexPriceResult {
    index_price: Option<serde_json::Value>,
}

/// Client for `GET {base_url}/public/get_index_price?index_name=<symbol>`.
#[derive(Debug, Clone)]
pub struct DeribitClient {
    base_url: String,
    http: Client,
}

impl DeribitClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, anyhow::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the current index price for `symbol` (e.g. "btc_usd").
    pub async fn get_index_price(&self, symbol: &str) -> Result<f64, FetchError> {
        let response = self
            .http
            .get(format!("{}/public/get_index_price", self.base_url))
            .query(&[("index_name", symbol.to_lowercase())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!("Deribit index price response for {}: {}", symbol, body);
        parse_index_price(&body)
    }
}

#[async_trait]
impl PriceFeed for DeribitClient {
    async fn fetch_index_price(&self, symbol: &str) -> Result<f64, FetchError> {
        self.get_index_price(symbol).await
    }
}

/// Extract `result.index_price` from a response body.
pub fn parse_index_price(body: &str) -> Result<f64, FetchError> {
    let parsed: IndexPriceResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    let value = parsed
        .result
        .and_then(|r| r.index_price)
        .ok_or_else(|| FetchError::Malformed("missing result.index_price".to_string()))?;

    let price = value
        .as_f64()
        .ok_or_else(|| FetchError::Malformed(format!("index_price is not a number: {}", value)))?;

    if !price.is_finite() || price < 0.0 {
        return Err(FetchError::Malformed(format!(
            "index_price out of range: {}",
            price
        )));
    }
    Ok(price)
}
