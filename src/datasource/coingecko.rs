//! CoinGecko-style `simple/price` client.

use super::{get_json_with_backoff, json_decimal, DataSourceError, PriceSource};
use crate::domain::Decimal;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Identifiers the price API uses for each asset involved in pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceIds {
    /// API id of the protocol fee token (e.g. "0x").
    pub fee_token_id: String,
    /// API id of the base asset (e.g. "ethereum").
    pub base_asset_id: String,
    /// Quote-currency code of the base asset (e.g. "eth").
    pub base_vs_currency: String,
    /// Quote-currency code of the fiat unit (e.g. "usd").
    pub fiat_currency: String,
}

impl Default for PriceIds {
    fn default() -> Self {
        Self {
            fee_token_id: "0x".to_string(),
            base_asset_id: "ethereum".to_string(),
            base_vs_currency: "eth".to_string(),
            fiat_currency: "usd".to_string(),
        }
    }
}

/// Price source backed by an HTTP `simple/price` endpoint.
#[derive(Debug, Clone)]
pub struct HttpPriceSource {
    client: Client,
    base_url: String,
    ids: PriceIds,
    max_elapsed: Duration,
}

impl HttpPriceSource {
    pub fn new(base_url: String, ids: PriceIds) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            ids,
            max_elapsed: Duration::from_secs(30),
        }
    }

    /// Cap the total time spent retrying a single price lookup.
    pub fn with_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed = max_elapsed;
        self
    }

    pub fn price_url(&self, id: &str, vs_currency: &str) -> String {
        format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.base_url, id, vs_currency
        )
    }

    async fn price(&self, id: &str, vs_currency: &str) -> Result<Decimal, DataSourceError> {
        debug!("Fetching price of {} in {}", id, vs_currency);
        let url = self.price_url(id, vs_currency);
        let response = get_json_with_backoff(&self.client, &url, self.max_elapsed).await?;
        parse_price(&response, id, vs_currency)
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn fee_token_price_in_base(&self) -> Result<Decimal, DataSourceError> {
        self.price(&self.ids.fee_token_id, &self.ids.base_vs_currency)
            .await
    }

    async fn fee_token_price_in_fiat(&self) -> Result<Decimal, DataSourceError> {
        self.price(&self.ids.fee_token_id, &self.ids.fiat_currency)
            .await
    }

    async fn base_asset_price_in_fiat(&self) -> Result<Decimal, DataSourceError> {
        self.price(&self.ids.base_asset_id, &self.ids.fiat_currency)
            .await
    }
}

/// Extract `response[id][vs_currency]`.
fn parse_price(
    response: &serde_json::Value,
    id: &str,
    vs_currency: &str,
) -> Result<Decimal, DataSourceError> {
    let entry = response
        .get(id)
        .ok_or_else(|| DataSourceError::ParseError(format!("No price entry for {}", id)))?;
    let price = json_decimal(entry, vs_currency)?;
    if price.is_negative() {
        return Err(DataSourceError::ParseError(format!(
            "Negative price for {} in {}",
            id, vs_currency
        )));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_url() {
        let source = HttpPriceSource::new(
            "https://api.coingecko.com/api/v3/".to_string(),
            PriceIds::default(),
        );
        assert_eq!(
            source.price_url("0x", "usd"),
            "https://api.coingecko.com/api/v3/simple/price?ids=0x&vs_currencies=usd"
        );
    }

    #[test]
    fn test_parse_price_valid() {
        let response = serde_json::json!({"0x": {"eth": 0.0005, "usd": "0.37"}});
        let eth = parse_price(&response, "0x", "eth").unwrap();
        let usd = parse_price(&response, "0x", "usd").unwrap();
        assert_eq!(eth, Decimal::from_str_canonical("0.0005").unwrap());
        assert_eq!(usd, Decimal::from_str_canonical("0.37").unwrap());
    }

    #[test]
    fn test_parse_price_scientific_notation() {
        let response = serde_json::json!({"0x": {"eth": 1.5e-7}});
        let eth = parse_price(&response, "0x", "eth").unwrap();
        assert_eq!(eth, Decimal::from_str_canonical("0.00000015").unwrap());
    }

    #[test]
    fn test_parse_price_from_raw_body_is_exact() {
        let body = r#"{"0x": {"eth": 0.000123456789012345678901}}"#;
        let response: serde_json::Value = serde_json::from_str(body).unwrap();
        let eth = parse_price(&response, "0x", "eth").unwrap();
        assert_eq!(eth, Decimal::from_str_canonical("0.000123456789012345678901").unwrap());
    }

    #[test]
    fn test_parse_price_missing_entry() {
        let response = serde_json::json!({"ethereum": {"usd": 3000}});
        let err = parse_price(&response, "0x", "usd").unwrap_err();
        assert!(matches!(err, DataSourceError::ParseError(_)));
    }

    #[test]
    fn test_parse_price_rejects_negative() {
        let response = serde_json::json!({"0x": {"usd": "-1"}});
        assert!(parse_price(&response, "0x", "usd").is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let source = HttpPriceSource::new("http://127.0.0.1:1".to_string(), PriceIds::default())
            .with_max_elapsed(Duration::from_millis(50));
        let err = source.base_asset_price_in_fiat().await.unwrap_err();
        assert!(matches!(err, DataSourceError::NetworkError(_)));
    }
}
