//! Error types for the price feed and the sample store.

use sea_orm::DbErr;
use thiserror::Error;

/// Why a single index-price fetch produced no price.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("feed rejected request with HTTP {status}")]
    Rejected { status: u16 },

    #[error("feed request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("malformed feed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Malformed(e.to_string())
        } else {
            Self::Transport(e)
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("price store unavailable: {0}")]
    Unavailable(#[from] DbErr),

    #[error("invalid sample: {0}")]
    InvalidSample(String),
}
