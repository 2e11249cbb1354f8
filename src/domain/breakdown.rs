//! Cost breakdown results, one variant per order mode.

use crate::domain::{Decimal, OrderMode};
use serde::{Deserialize, Serialize};

/// Fee and total cost of an order in every denomination shown to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub fee_in_fiat: Decimal,
    pub fee_in_base: Decimal,
    pub fee_in_protocol_token: Decimal,
    pub total_cost_in_base: Decimal,
    pub total_cost_in_fiat: Decimal,
    pub fillable: bool,
}

/// Limit orders can always be posted, so the breakdown is always fillable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitBreakdown {
    pub cost: CostBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketBreakdown {
    /// `cost.fillable` is false when the book cannot cover the request; the
    /// figures are then a best-effort estimate over whatever depth exists.
    pub cost: CostBreakdown,
    pub orders_consumed: usize,
    /// Token amount the selected orders cover, in smallest units.
    pub filled_amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum OrderDetails {
    Limit(LimitBreakdown),
    Market(MarketBreakdown),
}

impl OrderDetails {
    pub fn mode(&self) -> OrderMode {
        match self {
            OrderDetails::Limit(_) => OrderMode::Limit,
            OrderDetails::Market(_) => OrderMode::Market,
        }
    }

    pub fn cost(&self) -> &CostBreakdown {
        match self {
            OrderDetails::Limit(b) => &b.cost,
            OrderDetails::Market(b) => &b.cost,
        }
    }

    pub fn fillable(&self) -> bool {
        self.cost().fillable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_serialize_with_mode_tag() {
        let details = OrderDetails::Market(MarketBreakdown {
            cost: CostBreakdown::default(),
            orders_consumed: 0,
            filled_amount: Decimal::zero(),
        });
        let json = serde_json::to_value(details).unwrap();
        assert_eq!(json["mode"], "market");
        assert_eq!(json["cost"]["fillable"], false);
        assert_eq!(json["orders_consumed"], 0);
    }

    #[test]
    fn test_cost_accessor() {
        let cost = CostBreakdown {
            fillable: true,
            ..CostBreakdown::default()
        };
        let details = OrderDetails::Limit(LimitBreakdown { cost });
        assert_eq!(details.mode(), OrderMode::Limit);
        assert!(details.fillable());
        assert_eq!(details.cost(), &cost);
    }
}
