use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{Decimal, OrderDetails, OrderKind, OrderMode, Side, Token, TradeRequest};
use crate::engine::{render, DisplayUnit, RenderedDetails};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCostQuery {
    pub side: Side,
    pub mode: OrderMode,
    pub symbol: Option<String>,
    pub decimals: Option<u32>,
    /// Amount in the token's smallest units.
    pub amount: String,
    /// Unit price in base asset per token; limit orders only.
    pub price: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderCostResponse {
    pub details: OrderDetails,
    pub display: RenderedDetails,
}

fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, AppError> {
    let value = Decimal::from_str_canonical(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid {}", field)))?;
    if value.is_negative() {
        return Err(AppError::BadRequest(format!("{} must not be negative", field)));
    }
    Ok(value)
}

fn build_request(params: &OrderCostQuery) -> Result<TradeRequest, AppError> {
    let token_amount = parse_decimal("amount", &params.amount)?;

    let token = params
        .symbol
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|symbol| {
            params
                .decimals
                .map(|decimals| Token::new(symbol, decimals))
                .ok_or_else(|| AppError::BadRequest("decimals is required with symbol".to_string()))
        })
        .transpose()?;

    let kind = match params.mode {
        OrderMode::Limit => {
            let raw = params
                .price
                .as_deref()
                .ok_or_else(|| AppError::BadRequest("price is required for limit orders".to_string()))?;
            OrderKind::Limit {
                unit_price: parse_decimal("price", raw)?,
            }
        }
        OrderMode::Market => OrderKind::Market,
    };

    Ok(TradeRequest {
        side: params.side,
        token,
        token_amount,
        kind,
    })
}

pub async fn get_order_cost(
    Query(params): Query<OrderCostQuery>,
    State(state): State<AppState>,
) -> Result<Json<OrderCostResponse>, AppError> {
    let request = build_request(&params)?;
    let unit = params
        .unit
        .as_deref()
        .map(str::parse::<DisplayUnit>)
        .transpose()
        .map_err(|e| AppError::BadRequest(format!("Invalid unit: {}", e)))?
        .unwrap_or_default();

    let details = state.calculator.estimate(&request).await?;
    let display = render(&details, unit, &state.labels);

    Ok(Json(OrderCostResponse { details, display }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(mode: OrderMode, price: Option<&str>) -> OrderCostQuery {
        OrderCostQuery {
            side: Side::Buy,
            mode,
            symbol: Some("ZRX".to_string()),
            decimals: Some(18),
            amount: "10000000000000000000".to_string(),
            price: price.map(str::to_string),
            unit: None,
        }
    }

    #[test]
    fn test_build_limit_request() {
        let request = build_request(&query(OrderMode::Limit, Some("0.01"))).unwrap();
        assert_eq!(request.mode(), OrderMode::Limit);
        assert_eq!(request.token, Some(Token::new("ZRX", 18)));
        assert_eq!(
            request.kind,
            OrderKind::Limit {
                unit_price: Decimal::from_str_canonical("0.01").unwrap()
            }
        );
    }

    #[test]
    fn test_limit_requires_price() {
        assert!(matches!(
            build_request(&query(OrderMode::Limit, None)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_market_ignores_price() {
        let request = build_request(&query(OrderMode::Market, Some("0.01"))).unwrap();
        assert_eq!(request.kind, OrderKind::Market);
    }

    #[test]
    fn test_blank_symbol_means_no_token() {
        let mut q = query(OrderMode::Market, None);
        q.symbol = Some("  ".to_string());
        let request = build_request(&q).unwrap();
        assert!(request.token.is_none());
    }

    #[test]
    fn test_symbol_without_decimals_rejected() {
        let mut q = query(OrderMode::Market, None);
        q.decimals = None;
        assert!(build_request(&q).is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut q = query(OrderMode::Market, None);
        q.amount = "-5".to_string();
        assert!(build_request(&q).is_err());
    }
}
