use anyhow::Context;
use order_cost::datasource::{HttpPriceSource, OrderBookSource, PriceSource, RelayerOrderBookSource};
use order_cost::{api, config::Config, OrderCostCalculator};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("Configuration error")?;

    let prices: Arc<dyn PriceSource> = Arc::new(HttpPriceSource::new(
        config.price_api_url.clone(),
        config.price_ids.clone(),
    ));
    let books: Arc<dyn OrderBookSource> =
        Arc::new(RelayerOrderBookSource::new(config.relayer_api_url.clone()));
    let calculator = Arc::new(OrderCostCalculator::new(prices, books, config.maker_fee));

    let app = api::create_router(api::AppState::new(calculator, config.display_labels()));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!(
        "Server listening on {} (maker fee {} {})",
        addr,
        config.maker_fee,
        config.fee_token_symbol
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
