//! Order cost estimation: order selection, cost arithmetic, the async
//! calculator that ties them to live prices, and display formatting.

pub mod calculator;
pub mod cost;
pub mod display;
pub mod selection;

pub use calculator::{CostError, OrderCostCalculator, RequestToken};
pub use cost::{compute_limit_cost, compute_market_cost};
pub use display::{
    render, DisplayLabels, DisplayPreferences, DisplayUnit, OrderDetailsView, RenderedDetails,
};
pub use selection::{select_orders_to_fill, OrderSelection, SelectedOrder};
