pub mod health;
pub mod order_cost;
pub mod quote;

use crate::engine::{DisplayLabels, OrderCostCalculator};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub calculator: Arc<OrderCostCalculator>,
    pub labels: DisplayLabels,
}

impl AppState {
    pub fn new(calculator: Arc<OrderCostCalculator>, labels: DisplayLabels) -> Self {
        Self { calculator, labels }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/order-cost", get(order_cost::get_order_cost))
        .route("/v1/quote", get(quote::get_quote))
        .layer(cors)
        .with_state(state)
}
