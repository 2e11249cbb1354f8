pub mod api;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;

pub use config::Config;
pub use datasource::{
    DataSourceError, HttpPriceSource, MockOrderBookSource, MockPriceSource, OrderBookSource,
    PriceSource, RelayerOrderBookSource,
};
pub use domain::{
    CostBreakdown, Decimal, OrderBook, OrderDetails, OrderKind, OrderMode, Quote, RestingOrder,
    Side, Token, TradeRequest,
};
pub use engine::{CostError, DisplayUnit, OrderCostCalculator, OrderDetailsView};
pub use error::AppError;
