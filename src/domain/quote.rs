//! Exchange-rate quote used to denominate fees and costs.

use crate::domain::{Decimal, TimeMs};
use serde::{Deserialize, Serialize};

/// The three reference prices needed to price one order.
///
/// Fetched fresh for every computation and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Protocol fee token price in base-asset units.
    pub fee_token_in_base: Decimal,
    /// Protocol fee token price in fiat units.
    pub fee_token_in_fiat: Decimal,
    /// Base asset price in fiat units.
    pub base_in_fiat: Decimal,
    pub fetched_at: TimeMs,
}

impl Quote {
    pub fn new(fee_token_in_base: Decimal, fee_token_in_fiat: Decimal, base_in_fiat: Decimal) -> Self {
        Self {
            fee_token_in_base,
            fee_token_in_fiat,
            base_in_fiat,
            fetched_at: TimeMs::now(),
        }
    }
}
