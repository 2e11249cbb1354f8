//! Mock data sources for testing without network calls.

use super::{DataSourceError, OrderBookSource, PriceSource};
use crate::domain::{Decimal, OrderBook, RestingOrder, Token};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Mock price source returning fixed prices.
///
/// Each price can be replaced by an error, and every call can be delayed to
/// simulate slow upstreams.
#[derive(Debug, Clone)]
pub struct MockPriceSource {
    fee_token_in_base: Result<Decimal, DataSourceError>,
    fee_token_in_fiat: Result<Decimal, DataSourceError>,
    base_in_fiat: Result<Decimal, DataSourceError>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl MockPriceSource {
    pub fn new(fee_token_in_base: Decimal, fee_token_in_fiat: Decimal, base_in_fiat: Decimal) -> Self {
        Self {
            fee_token_in_base: Ok(fee_token_in_base),
            fee_token_in_fiat: Ok(fee_token_in_fiat),
            base_in_fiat: Ok(base_in_fiat),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_fee_token_in_base_error(mut self, err: DataSourceError) -> Self {
        self.fee_token_in_base = Err(err);
        self
    }

    pub fn with_fee_token_in_fiat_error(mut self, err: DataSourceError) -> Self {
        self.fee_token_in_fiat = Err(err);
        self
    }

    pub fn with_base_in_fiat_error(mut self, err: DataSourceError) -> Self {
        self.base_in_fiat = Err(err);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Total number of price lookups served, across all clones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn serve(&self, value: &Result<Decimal, DataSourceError>) -> Result<Decimal, DataSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        value.clone()
    }
}

impl Default for MockPriceSource {
    fn default() -> Self {
        Self::new(Decimal::one(), Decimal::one(), Decimal::one())
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn fee_token_price_in_base(&self) -> Result<Decimal, DataSourceError> {
        self.serve(&self.fee_token_in_base).await
    }

    async fn fee_token_price_in_fiat(&self) -> Result<Decimal, DataSourceError> {
        self.serve(&self.fee_token_in_fiat).await
    }

    async fn base_asset_price_in_fiat(&self) -> Result<Decimal, DataSourceError> {
        self.serve(&self.base_in_fiat).await
    }
}

/// Mock order-book source serving one fixed book for every token.
#[derive(Debug, Clone, Default)]
pub struct MockOrderBookSource {
    orders: Vec<RestingOrder>,
    error: Option<DataSourceError>,
}

impl MockOrderBookSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(mut self, order: RestingOrder) -> Self {
        self.orders.push(order);
        self
    }

    pub fn with_orders(mut self, orders: Vec<RestingOrder>) -> Self {
        self.orders.extend(orders);
        self
    }

    pub fn with_error(mut self, err: DataSourceError) -> Self {
        self.error = Some(err);
        self
    }
}

#[async_trait]
impl OrderBookSource for MockOrderBookSource {
    async fn fetch_order_book(&self, _token: &Token) -> Result<OrderBook, DataSourceError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        Ok(OrderBook::from_orders(self.orders.clone()))
    }
}
