use crate::engine::CostError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<CostError> for AppError {
    fn from(err: CostError) -> Self {
        match err {
            CostError::NoTokenSelected | CostError::Amount(_) => {
                AppError::BadRequest(err.to_string())
            }
            CostError::Superseded { .. } => AppError::Conflict(err.to_string()),
            CostError::Price(_) | CostError::OrderBook(_) => AppError::Upstream(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::{DataSourceError, MockOrderBookSource, MockPriceSource};
    use crate::domain::{AmountError, Decimal};
    use crate::engine::OrderCostCalculator;
    use std::sync::Arc;

    #[test]
    fn test_cost_error_status_mapping() {
        let calculator = OrderCostCalculator::new(
            Arc::new(MockPriceSource::default()),
            Arc::new(MockOrderBookSource::new()),
            Decimal::one(),
        );
        let older = calculator.issue_token();
        let latest = calculator.issue_token();

        let cases = vec![
            (CostError::NoTokenSelected, StatusCode::BAD_REQUEST),
            (
                CostError::Amount(AmountError::ScaleOverflow { decimals: 40 }),
                StatusCode::BAD_REQUEST,
            ),
            (
                CostError::Superseded {
                    token: older,
                    latest,
                },
                StatusCode::CONFLICT,
            ),
            (
                CostError::Price(DataSourceError::RateLimited),
                StatusCode::BAD_GATEWAY,
            ),
            (
                CostError::OrderBook(DataSourceError::Other("down".to_string())),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, expected) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
