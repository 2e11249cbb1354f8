//! Resting orders and order-book snapshots.

use crate::domain::{AmountError, Decimal, Side};
use serde::{Deserialize, Serialize};

/// A previously posted order that a market order may be matched against.
///
/// Amounts are in smallest on-chain units; `price` is base asset per token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestingOrder {
    pub order_hash: String,
    /// Side of the maker who posted the order.
    pub side: Side,
    pub price: Decimal,
    pub size: Decimal,
    pub filled: Decimal,
    /// Protocol fee charged for filling this order, in fee-token smallest units.
    pub maker_fee: Decimal,
}

impl RestingOrder {
    pub fn new(
        order_hash: impl Into<String>,
        side: Side,
        price: Decimal,
        size: Decimal,
        maker_fee: Decimal,
    ) -> Self {
        Self {
            order_hash: order_hash.into(),
            side,
            price,
            size,
            filled: Decimal::zero(),
            maker_fee,
        }
    }

    pub fn with_filled(mut self, filled: Decimal) -> Self {
        self.filled = filled;
        self
    }

    /// Amount still available to take; never negative and never above `size`.
    pub fn remaining(&self) -> Decimal {
        let filled = self.filled.max(Decimal::zero());
        self.size
            .checked_sub(filled)
            .map_or(Decimal::zero(), |left| left.max(Decimal::zero()))
    }
}

/// Snapshot of open orders for one token.
///
/// Bids are kept best (highest) price first, asks best (lowest) price first.
/// Orders at equal prices keep the order they arrived in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    bids: Vec<RestingOrder>,
    asks: Vec<RestingOrder>,
}

impl OrderBook {
    pub fn new(mut bids: Vec<RestingOrder>, mut asks: Vec<RestingOrder>) -> Self {
        bids.sort_by(|a, b| b.price.cmp(&a.price));
        asks.sort_by(|a, b| a.price.cmp(&b.price));
        Self { bids, asks }
    }

    /// Build a book from an unsplit list of orders, routing each by its side.
    pub fn from_orders(orders: impl IntoIterator<Item = RestingOrder>) -> Self {
        let (bids, asks): (Vec<_>, Vec<_>) =
            orders.into_iter().partition(|o| o.side == Side::Buy);
        Self::new(bids, asks)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bids(&self) -> &[RestingOrder] {
        &self.bids
    }

    pub fn asks(&self) -> &[RestingOrder] {
        &self.asks
    }

    /// Orders a taker on `side` would consume, in price priority.
    pub fn liquidity_for(&self, side: Side) -> &[RestingOrder] {
        match side {
            Side::Buy => &self.asks,
            Side::Sell => &self.bids,
        }
    }

    /// Total remaining amount available to a taker on `side`.
    pub fn depth(&self, side: Side) -> Result<Decimal, AmountError> {
        Decimal::checked_sum(self.liquidity_for(side).iter().map(RestingOrder::remaining))
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
