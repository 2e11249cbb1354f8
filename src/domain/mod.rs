//! Domain types for order cost estimation.
//!
//! This module provides:
//! - Lossless numeric handling via Decimal wrapper
//! - Domain primitives: TimeMs, Token, Side, OrderMode
//! - Trade requests, resting orders and order-book snapshots
//! - Quotes and the per-mode cost breakdowns computed from them

pub mod breakdown;
pub mod decimal;
pub mod order;
pub mod primitives;
pub mod quote;
pub mod trade;

pub use breakdown::{CostBreakdown, LimitBreakdown, MarketBreakdown, OrderDetails};
pub use decimal::{AmountError, Decimal};
pub use order::{OrderBook, RestingOrder};
pub use primitives::{OrderMode, Side, TimeMs, Token};
pub use quote::Quote;
pub use trade::{OrderKind, TradeRequest};
