use crate::datasource::coingecko::PriceIds;
use crate::domain::Decimal;
use crate::engine::DisplayLabels;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub price_api_url: String,
    pub relayer_api_url: String,
    /// Fixed protocol fee charged on limit orders, in fee-token units.
    pub maker_fee: Decimal,
    pub price_ids: PriceIds,
    pub fee_token_symbol: String,
    pub base_symbol: String,
    pub display_precision: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let price_api_url = env_map
            .get("PRICE_API_URL")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("PRICE_API_URL".to_string()))?;

        let relayer_api_url = env_map
            .get("RELAYER_API_URL")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("RELAYER_API_URL".to_string()))?;

        let maker_fee = env_map
            .get("MAKER_FEE")
            .map(|s| s.as_str())
            .unwrap_or("1")
            .parse::<Decimal>()
            .map_err(|_| {
                ConfigError::InvalidValue("MAKER_FEE".to_string(), "must be a decimal".to_string())
            })?;
        if maker_fee.is_negative() {
            return Err(ConfigError::InvalidValue(
                "MAKER_FEE".to_string(),
                "must not be negative".to_string(),
            ));
        }

        let defaults = PriceIds::default();
        let price_ids = PriceIds {
            fee_token_id: string_or(&env_map, "FEE_TOKEN_ID", defaults.fee_token_id),
            base_asset_id: string_or(&env_map, "BASE_ASSET_ID", defaults.base_asset_id),
            base_vs_currency: string_or(&env_map, "BASE_VS_CURRENCY", defaults.base_vs_currency),
            fiat_currency: string_or(&env_map, "FIAT_CURRENCY", defaults.fiat_currency),
        };

        let labels = DisplayLabels::default();
        let fee_token_symbol = string_or(&env_map, "FEE_TOKEN_SYMBOL", labels.fee_token_symbol);
        let base_symbol = string_or(&env_map, "BASE_SYMBOL", labels.base_symbol);

        let display_precision = env_map
            .get("DISPLAY_PRECISION")
            .map(|s| s.as_str())
            .unwrap_or("2")
            .parse::<u32>()
            .ok()
            .filter(|p| *p <= 18)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "DISPLAY_PRECISION".to_string(),
                    "must be an integer between 0 and 18".to_string(),
                )
            })?;

        Ok(Config {
            port,
            price_api_url,
            relayer_api_url,
            maker_fee,
            price_ids,
            fee_token_symbol,
            base_symbol,
            display_precision,
        })
    }

    pub fn display_labels(&self) -> DisplayLabels {
        DisplayLabels {
            fee_token_symbol: self.fee_token_symbol.clone(),
            base_symbol: self.base_symbol.clone(),
            precision: self.display_precision,
            ..DisplayLabels::default()
        }
    }
}

fn string_or(env_map: &HashMap<String, String>, key: &str, default: String) -> String {
    env_map
        .get(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
}
