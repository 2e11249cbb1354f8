//! Relayer order-book client.
//!
//! Expects a Standard Relayer API style payload:
//! `{"bids": {"records": [...]}, "asks": {"records": [...]}}` where each
//! record is `{"order": {...}, "metaData": {...}}`.

use super::{get_json_with_backoff, json_decimal, DataSourceError, OrderBookSource};
use crate::domain::{Decimal, OrderBook, RestingOrder, Side, Token};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct RelayerOrderBookSource {
    client: Client,
    base_url: String,
    max_elapsed: Duration,
}

impl RelayerOrderBookSource {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            max_elapsed: Duration::from_secs(30),
        }
    }

    pub fn with_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed = max_elapsed;
        self
    }

    pub fn orderbook_url(&self, token: &Token) -> String {
        format!("{}/orderbook?baseAssetSymbol={}", self.base_url, token.symbol)
    }
}

#[async_trait]
impl OrderBookSource for RelayerOrderBookSource {
    async fn fetch_order_book(&self, token: &Token) -> Result<OrderBook, DataSourceError> {
        let url = self.orderbook_url(token);
        debug!("Fetching order book for {} from {}", token, url);

        let response = get_json_with_backoff(&self.client, &url, self.max_elapsed).await?;
        parse_order_book(&response)
    }
}

fn parse_order_book(response: &serde_json::Value) -> Result<OrderBook, DataSourceError> {
    let bids = parse_side(response, "bids", Side::Buy)?;
    let asks = parse_side(response, "asks", Side::Sell)?;
    Ok(OrderBook::new(bids, asks))
}

fn parse_side(
    response: &serde_json::Value,
    key: &str,
    side: Side,
) -> Result<Vec<RestingOrder>, DataSourceError> {
    let records = response
        .get(key)
        .and_then(|v| v.get("records"))
        .and_then(|v| v.as_array())
        .ok_or_else(|| DataSourceError::ParseError(format!("Missing {}.records", key)))?;

    let mut orders = Vec::with_capacity(records.len());
    for record in records {
        match parse_record(record, side) {
            Ok(order) => orders.push(order),
            Err(e) => {
                warn!("Skipping malformed {} record: {}", key, e);
            }
        }
    }
    Ok(orders)
}

fn parse_record(record: &serde_json::Value, side: Side) -> Result<RestingOrder, DataSourceError> {
    let order = record
        .get("order")
        .ok_or_else(|| DataSourceError::ParseError("Missing order field".to_string()))?;

    let order_hash = order
        .get("orderHash")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let price = json_decimal(order, "price")?;
    let size = json_decimal(order, "size")?;
    let maker_fee = json_decimal(order, "makerFee")?;

    let filled = match record.get("metaData") {
        Some(meta) if meta.get("filled").is_some() => json_decimal(meta, "filled")?,
        _ => Decimal::zero(),
    };

    if [price, size, maker_fee, filled].iter().any(Decimal::is_negative) {
        return Err(DataSourceError::ParseError(
            "Negative price, size, fee or filled amount".to_string(),
        ));
    }

    Ok(RestingOrder::new(order_hash, side, price, size, maker_fee).with_filled(filled))
}
