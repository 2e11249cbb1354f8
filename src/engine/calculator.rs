use crate::datasource::{DataSourceError, OrderBookSource, PriceSource};
use crate::domain::{AmountError, Decimal, OrderDetails, OrderKind, Quote, TradeRequest};
use crate::engine::cost::{compute_limit_cost, compute_market_cost};
use crate::engine::selection::select_orders_to_fill;
use futures::future::{try_join, try_join3};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Sequence number identifying one `compute_cost` call.
///
/// Tokens increase monotonically; only the most recently issued token may
/// deliver a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum CostError {
    #[error("no token selected")]
    NoTokenSelected,
    #[error("price fetch failed: {0}")]
    Price(DataSourceError),
    #[error("order book fetch failed: {0}")]
    OrderBook(DataSourceError),
    #[error("request {token} superseded by {latest}")]
    Superseded {
        token: RequestToken,
        latest: RequestToken,
    },
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Prices trades against freshly fetched quotes.
///
/// Holds no result cache: every call refetches prices and returns a new
/// `OrderDetails`. Calls may overlap; a call that finishes after a newer one
/// was issued fails with `CostError::Superseded`.
#[derive(Debug)]
pub struct OrderCostCalculator {
    prices: Arc<dyn PriceSource>,
    books: Arc<dyn OrderBookSource>,
    maker_fee: Decimal,
    latest: AtomicU64,
}

impl OrderCostCalculator {
    /// `maker_fee` is the fixed protocol fee charged on limit orders, in
    /// fee-token units.
    pub fn new(
        prices: Arc<dyn PriceSource>,
        books: Arc<dyn OrderBookSource>,
        maker_fee: Decimal,
    ) -> Self {
        Self {
            prices,
            books,
            maker_fee,
            latest: AtomicU64::new(0),
        }
    }

    pub fn maker_fee(&self) -> Decimal {
        self.maker_fee
    }

    /// Issue a new token, superseding every earlier one.
    pub fn issue_token(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn latest_token(&self) -> RequestToken {
        RequestToken(self.latest.load(Ordering::SeqCst))
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest_token() == token
    }

    /// Fetch the three reference prices concurrently, failing on the first error.
    pub async fn fetch_quote(&self) -> Result<Quote, CostError> {
        let (fee_token_in_base, fee_token_in_fiat, base_in_fiat) = try_join3(
            self.prices.fee_token_price_in_base(),
            self.prices.fee_token_price_in_fiat(),
            self.prices.base_asset_price_in_fiat(),
        )
        .await
        .map_err(CostError::Price)?;

        Ok(Quote::new(fee_token_in_base, fee_token_in_fiat, base_in_fiat))
    }

    /// Compute the fee and total cost of `request`.
    ///
    /// A request without a token is a no-op: it returns
    /// `CostError::NoTokenSelected` without superseding calls in flight.
    pub async fn compute_cost(&self, request: &TradeRequest) -> Result<OrderDetails, CostError> {
        if request.token.is_none() {
            debug!("Skipping cost computation: no token selected");
            return Err(CostError::NoTokenSelected);
        }
        let token = self.issue_token();
        self.compute_cost_for(request, token).await
    }

    /// Compute under a token issued earlier with [`Self::issue_token`].
    pub async fn compute_cost_for(
        &self,
        request: &TradeRequest,
        token: RequestToken,
    ) -> Result<OrderDetails, CostError> {
        let result = self.estimate(request).await;

        let latest = self.latest_token();
        if latest != token {
            warn!(
                "Discarding {} cost result for request {}: superseded by {}",
                request.mode(),
                token,
                latest
            );
            return Err(CostError::Superseded { token, latest });
        }

        match &result {
            Ok(details) => info!(
                "Computed {} cost for request {}: total {} base / {} fiat, fillable={}",
                details.mode(),
                token,
                details.cost().total_cost_in_base,
                details.cost().total_cost_in_fiat,
                details.fillable()
            ),
            Err(e) => warn!("Cost computation for request {} failed: {}", token, e),
        }
        result
    }

    /// Compute without taking part in supersession.
    ///
    /// For callers serving independent requests, such as the HTTP API, where
    /// one request must not cancel another.
    pub async fn estimate(&self, request: &TradeRequest) -> Result<OrderDetails, CostError> {
        let traded = request.token.as_ref().ok_or(CostError::NoTokenSelected)?;
        debug!(
            "Computing {} {} cost for {} {}",
            request.mode(),
            request.side,
            request.token_amount,
            traded
        );

        match request.kind {
            OrderKind::Limit { unit_price } => {
                let quote = self.fetch_quote().await?;
                let breakdown = compute_limit_cost(
                    request.token_amount,
                    traded.decimals,
                    unit_price,
                    self.maker_fee,
                    &quote,
                )?;
                Ok(OrderDetails::Limit(breakdown))
            }
            OrderKind::Market => {
                let book = async {
                    self.books
                        .fetch_order_book(traded)
                        .await
                        .map_err(CostError::OrderBook)
                };
                let (quote, book) = try_join(self.fetch_quote(), book).await?;

                let selection = select_orders_to_fill(request.token_amount, request.side, &book)?;
                if !selection.fully_fillable {
                    debug!(
                        "Book depth {} cannot fill {} {}",
                        selection.filled_amount(),
                        request.token_amount,
                        traded
                    );
                }
                let breakdown = compute_market_cost(&selection, traded.decimals, &quote)?;
                Ok(OrderDetails::Market(breakdown))
            }
        }
    }
}
