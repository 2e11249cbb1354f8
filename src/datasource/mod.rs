//! Data source abstraction for fetching reference prices and order books.

use crate::domain::{Decimal, OrderBook, Token};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub mod coingecko;
pub mod mock;
pub mod relayer;

pub use coingecko::HttpPriceSource;
pub use mock::{MockOrderBookSource, MockPriceSource};
pub use relayer::RelayerOrderBookSource;

/// Reference prices used to denominate fees and costs.
///
/// Implementations own any retry/backoff policy; callers treat each call as
/// a single attempt.
#[async_trait]
pub trait PriceSource: Send + Sync + fmt::Debug {
    /// Price of the protocol fee token in base-asset units.
    async fn fee_token_price_in_base(&self) -> Result<Decimal, DataSourceError>;

    /// Price of the protocol fee token in fiat units.
    async fn fee_token_price_in_fiat(&self) -> Result<Decimal, DataSourceError>;

    /// Price of the base asset in fiat units.
    async fn base_asset_price_in_fiat(&self) -> Result<Decimal, DataSourceError>;
}

/// Open orders for a token.
#[async_trait]
pub trait OrderBookSource: Send + Sync + fmt::Debug {
    /// Fetch a snapshot of bids and asks for `token` against the base asset.
    async fn fetch_order_book(&self, token: &Token) -> Result<OrderBook, DataSourceError>;
}

/// Why a price or order-book fetch failed.
///
/// `Clone` so the same failure can be injected into several mock calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataSourceError {
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("HTTP error {status}: {message}")]
    HttpError { status: u16, message: String },
    /// The body arrived but was not the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Error: {0}")]
    Other(String),
}

/// Classify a response status for retry purposes.
///
/// Returns `None` on success, otherwise the error and whether it is worth
/// retrying.
pub(crate) fn classify_status(status: reqwest::StatusCode) -> Option<(DataSourceError, bool)> {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Some((DataSourceError::RateLimited, true));
    }
    if status.is_server_error() {
        return Some((
            DataSourceError::HttpError {
                status: status.as_u16(),
                message: "Server error".to_string(),
            },
            true,
        ));
    }
    if !status.is_success() {
        return Some((
            DataSourceError::HttpError {
                status: status.as_u16(),
                message: "Client error".to_string(),
            },
            false,
        ));
    }
    None
}

/// GET `url` and decode the JSON body, retrying transient failures with
/// exponential backoff for at most `max_elapsed`.
pub(crate) async fn get_json_with_backoff(
    client: &reqwest::Client,
    url: &str,
    max_elapsed: Duration,
) -> Result<serde_json::Value, DataSourceError> {
    let backoff = ExponentialBackoff {
        max_elapsed_time: Some(max_elapsed),
        ..Default::default()
    };

    retry(backoff, || async {
        let response = client.get(url).send().await.map_err(|e| {
            backoff::Error::transient(DataSourceError::NetworkError(e.to_string()))
        })?;

        if let Some((err, transient)) = classify_status(response.status()) {
            return Err(if transient {
                backoff::Error::transient(err)
            } else {
                backoff::Error::permanent(err)
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| backoff::Error::permanent(DataSourceError::ParseError(e.to_string())))
    })
    .await
}

/// Read a decimal that may arrive as a JSON string or number.
pub(crate) fn json_decimal(value: &serde_json::Value, field: &str) -> Result<Decimal, DataSourceError> {
    let raw = match value.get(field) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => return Err(DataSourceError::ParseError(format!("Missing {} field", field))),
    };
    // With `arbitrary_precision`, a JSON number keeps its source text, so
    // `to_string` never goes through f64.
    Decimal::from_str_canonical(&raw)
        .or_else(|_| rust_decimal::Decimal::from_scientific(&raw).map(Decimal::new))
        .map_err(|e| DataSourceError::ParseError(format!("Invalid {}: {}", field, e)))
}
