//! Display unit selection and formatting of computed breakdowns.
//!
//! Everything here works on already computed values. Switching units never
//! refetches prices or changes a figure; it only changes which figure is
//! surfaced.

use crate::domain::{OrderDetails, OrderMode};
use crate::engine::calculator::CostError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Shown in place of a total cost the book cannot fill.
pub const UNFILLABLE_PLACEHOLDER: &str = "---";

/// Which denomination the fee is shown in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    Fiat,
    /// The protocol fee token itself.
    #[default]
    Native,
}

impl DisplayUnit {
    pub fn toggled(self) -> Self {
        match self {
            DisplayUnit::Fiat => DisplayUnit::Native,
            DisplayUnit::Native => DisplayUnit::Fiat,
        }
    }
}

impl std::str::FromStr for DisplayUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fiat" => Ok(DisplayUnit::Fiat),
            "native" => Ok(DisplayUnit::Native),
            other => Err(format!("must be fiat or native, got {}", other)),
        }
    }
}

/// Display unit per order mode; limit and market are toggled independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayPreferences {
    limit: DisplayUnit,
    market: DisplayUnit,
}

impl DisplayPreferences {
    pub fn unit(&self, mode: OrderMode) -> DisplayUnit {
        match mode {
            OrderMode::Limit => self.limit,
            OrderMode::Market => self.market,
        }
    }

    pub fn set_unit(&mut self, mode: OrderMode, unit: DisplayUnit) {
        match mode {
            OrderMode::Limit => self.limit = unit,
            OrderMode::Market => self.market = unit,
        }
    }

    /// Flip the unit for `mode` and return the new one.
    pub fn toggle_display_unit(&mut self, mode: OrderMode) -> DisplayUnit {
        let unit = self.unit(mode).toggled();
        self.set_unit(mode, unit);
        unit
    }
}

/// Symbols and precision used when formatting figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLabels {
    pub fee_token_symbol: String,
    pub base_symbol: String,
    pub fiat_prefix: String,
    /// Fractional digits for base-asset and fiat figures.
    pub precision: u32,
}

impl Default for DisplayLabels {
    fn default() -> Self {
        Self {
            fee_token_symbol: "ZRX".to_string(),
            base_symbol: "wETH".to_string(),
            fiat_prefix: "$".to_string(),
            precision: 2,
        }
    }
}

/// Formatted strings for one order-details panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDetails {
    pub mode: OrderMode,
    pub unit: DisplayUnit,
    pub fee: String,
    pub total_cost: String,
    /// True when the figures were kept from an earlier computation after a
    /// later one failed.
    pub stale: bool,
}

/// Format `details` in `unit`.
pub fn render(details: &OrderDetails, unit: DisplayUnit, labels: &DisplayLabels) -> RenderedDetails {
    let cost = details.cost();
    let fee = match unit {
        DisplayUnit::Fiat => format!(
            "{} {}",
            labels.fiat_prefix,
            cost.fee_in_fiat.to_fixed(labels.precision)
        ),
        DisplayUnit::Native => format!(
            "{} {}",
            cost.fee_in_protocol_token, labels.fee_token_symbol
        ),
    };

    let total_cost = if cost.fillable {
        format!(
            "({} {}) {} {}",
            cost.total_cost_in_base.to_fixed(labels.precision),
            labels.base_symbol,
            labels.fiat_prefix,
            cost.total_cost_in_fiat.to_fixed(labels.precision)
        )
    } else {
        UNFILLABLE_PLACEHOLDER.to_string()
    };

    RenderedDetails {
        mode: details.mode(),
        unit,
        fee,
        total_cost,
        stale: false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    details: OrderDetails,
    stale: bool,
}

/// Caller-held state for an order-details panel.
///
/// Keeps the last result per order mode plus the display preferences. Only
/// [`OrderDetailsView::apply`] writes results.
#[derive(Debug, Clone, Default)]
pub struct OrderDetailsView {
    labels: DisplayLabels,
    preferences: DisplayPreferences,
    limit: Option<Slot>,
    market: Option<Slot>,
}

impl OrderDetailsView {
    pub fn new(labels: DisplayLabels) -> Self {
        Self {
            labels,
            ..Self::default()
        }
    }

    pub fn preferences(&self) -> DisplayPreferences {
        self.preferences
    }

    pub fn toggle_display_unit(&mut self, mode: OrderMode) -> DisplayUnit {
        let unit = self.preferences.toggle_display_unit(mode);
        debug!("Display unit for {} orders is now {:?}", mode, unit);
        unit
    }

    fn slot_mut(&mut self, mode: OrderMode) -> &mut Option<Slot> {
        match mode {
            OrderMode::Limit => &mut self.limit,
            OrderMode::Market => &mut self.market,
        }
    }

    fn slot(&self, mode: OrderMode) -> Option<&Slot> {
        match mode {
            OrderMode::Limit => self.limit.as_ref(),
            OrderMode::Market => self.market.as_ref(),
        }
    }

    /// Record the outcome of a computation issued for `mode`.
    ///
    /// A fresh result replaces the slot. A missing token or a superseded
    /// request leaves it untouched. Any other failure keeps the previous
    /// figures but marks them stale. Figures for the other mode are
    /// rejected. Returns true when new figures were stored.
    pub fn apply(&mut self, mode: OrderMode, result: Result<OrderDetails, CostError>) -> bool {
        match result {
            Ok(details) if details.mode() != mode => {
                warn!(
                    "Ignoring {} figures delivered for the {} view",
                    details.mode(),
                    mode
                );
                false
            }
            Ok(details) => {
                *self.slot_mut(mode) = Some(Slot {
                    details,
                    stale: false,
                });
                true
            }
            Err(CostError::NoTokenSelected) | Err(CostError::Superseded { .. }) => false,
            Err(e) => {
                debug!("Keeping previous {} figures after error: {}", mode, e);
                if let Some(slot) = self.slot_mut(mode) {
                    slot.stale = true;
                }
                false
            }
        }
    }

    pub fn details(&self, mode: OrderMode) -> Option<&OrderDetails> {
        self.slot(mode).map(|s| &s.details)
    }

    pub fn is_stale(&self, mode: OrderMode) -> bool {
        self.slot(mode).is_some_and(|s| s.stale)
    }

    /// Format the last figures for `mode` in its current display unit.
    pub fn render(&self, mode: OrderMode) -> Option<RenderedDetails> {
        let slot = self.slot(mode)?;
        let mut rendered = render(&slot.details, self.preferences.unit(mode), &self.labels);
        rendered.stale = slot.stale;
        Some(rendered)
    }
}
