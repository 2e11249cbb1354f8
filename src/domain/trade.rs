//! Trade request: what the user wants to do, before any pricing.

use crate::domain::{Decimal, OrderMode, Side, Token};
use serde::{Deserialize, Serialize};

/// Order placement, carrying the fields only that placement needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum OrderKind {
    /// Post an order at `unit_price` base asset per token.
    Limit { unit_price: Decimal },
    /// Take resting liquidity at whatever the book offers.
    Market,
}

impl OrderKind {
    pub fn mode(&self) -> OrderMode {
        match self {
            OrderKind::Limit { .. } => OrderMode::Limit,
            OrderKind::Market => OrderMode::Market,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub side: Side,
    /// `None` until the user has picked a token.
    pub token: Option<Token>,
    /// Requested amount in the token's smallest units.
    pub token_amount: Decimal,
    pub kind: OrderKind,
}

impl TradeRequest {
    pub fn limit(side: Side, token: Token, token_amount: Decimal, unit_price: Decimal) -> Self {
        Self {
            side,
            token: Some(token),
            token_amount,
            kind: OrderKind::Limit { unit_price },
        }
    }

    pub fn market(side: Side, token: Token, token_amount: Decimal) -> Self {
        Self {
            side,
            token: Some(token),
            token_amount,
            kind: OrderKind::Market,
        }
    }

    pub fn mode(&self) -> OrderMode {
        self.kind.mode()
    }
}
