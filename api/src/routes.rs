use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{PriceSample, TimeRange};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TickerQuery {
    ticker: String,
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    ticker: String,
    start_date: Option<i64>,
    end_date: Option<i64>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/prices", get(all_prices))
        .route("/prices/", get(all_prices))
        .route("/prices/latest", get(latest_price))
        .route("/prices/filter", get(prices_by_date))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Deribit Price Tracker API",
        "version": env!("CARGO_PKG_VERSION"),
        "git_hash": env!("GIT_HASH"),
        "build_time": env!("BUILD_TIME"),
        "endpoints": {
            "all_prices": "/prices?ticker=btc_usd",
            "latest_price": "/prices/latest?ticker=btc_usd",
            "filter_by_date": "/prices/filter?ticker=btc_usd&start_date=1234567890&end_date=1234567999",
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

fn ensure_tracked(state: &AppState, ticker: &str) -> Result<(), ApiError> {
    if state.is_tracked(ticker) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "Unknown ticker: {} (expected one of: {})",
            ticker,
            state.symbols.join(", ")
        )))
    }
}

async fn all_prices(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TickerQuery>,
) -> Result<Json<Vec<PriceSample>>, ApiError> {
    ensure_tracked(&state, &q.ticker)?;
    let prices = state.price_service.all_prices(&q.ticker).await?;
    Ok(Json(prices))
}

async fn latest_price(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TickerQuery>,
) -> Result<Json<PriceSample>, ApiError> {
    ensure_tracked(&state, &q.ticker)?;
    let price = state.price_service.latest_price(&q.ticker).await?;
    Ok(Json(price))
}

async fn prices_by_date(
    State(state): State<Arc<AppState>>,
    Query(q): Query<FilterQuery>,
) -> Result<Json<Vec<PriceSample>>, ApiError> {
    ensure_tracked(&state, &q.ticker)?;
    let range = TimeRange::new(q.start_date, q.end_date);
    let prices = state.price_service.prices_in_range(&q.ticker, range).await?;
    Ok(Json(prices))
}
