//! Fee and total-cost arithmetic for limit and market orders.
//!
//! All figures are decimals, exact down to 28 fractional digits. Display
//! rounding happens later, when a value is formatted.

use crate::domain::{AmountError, CostBreakdown, Decimal, LimitBreakdown, MarketBreakdown, Quote};
use crate::engine::selection::OrderSelection;

/// Price a limit order of `token_amount` (smallest units) at `unit_price`.
///
/// `fixed_fee` is the protocol fee charged for posting, in fee-token units.
pub fn compute_limit_cost(
    token_amount: Decimal,
    token_decimals: u32,
    unit_price: Decimal,
    fixed_fee: Decimal,
    quote: &Quote,
) -> Result<LimitBreakdown, AmountError> {
    let human_amount = Decimal::from_base_units(token_amount, token_decimals)?;

    let fee_in_base = quote.fee_token_in_base.checked_mul(fixed_fee)?;
    let notional_in_base = human_amount.checked_mul(unit_price)?;
    let total_cost_in_base = notional_in_base.checked_add(fee_in_base)?;

    let fee_in_fiat = quote.fee_token_in_fiat.checked_mul(fixed_fee)?;
    let total_cost_in_fiat = notional_in_base
        .checked_mul(quote.base_in_fiat)?
        .checked_add(fee_in_fiat)?;

    Ok(LimitBreakdown {
        cost: CostBreakdown {
            fee_in_fiat,
            fee_in_base,
            fee_in_protocol_token: fixed_fee,
            total_cost_in_base,
            total_cost_in_fiat,
            fillable: true,
        },
    })
}

/// Price a market order from the resting orders selected to fill it.
///
/// Payments and maker fees are in smallest units and are scaled down by the
/// traded token's decimals. An unfillable selection is still priced.
pub fn compute_market_cost(
    selection: &OrderSelection,
    token_decimals: u32,
    quote: &Quote,
) -> Result<MarketBreakdown, AmountError> {
    let total_fee_units = selection.total_maker_fee()?;
    let total_payment_units = selection.total_payment()?;

    let notional_in_base = Decimal::from_base_units(total_payment_units, token_decimals)?;
    let fee_in_protocol_token = Decimal::from_base_units(total_fee_units, token_decimals)?;

    let fee_in_base = fee_in_protocol_token.checked_mul(quote.fee_token_in_base)?;
    let total_cost_in_base = notional_in_base.checked_add(fee_in_base)?;

    let fee_in_fiat = fee_in_protocol_token.checked_mul(quote.fee_token_in_fiat)?;
    let total_cost_in_fiat = notional_in_base
        .checked_mul(quote.base_in_fiat)?
        .checked_add(fee_in_fiat)?;

    Ok(MarketBreakdown {
        cost: CostBreakdown {
            fee_in_fiat,
            fee_in_base,
            fee_in_protocol_token,
            total_cost_in_base,
            total_cost_in_fiat,
            fillable: selection.fully_fillable,
        },
        orders_consumed: selection.orders.len(),
        filled_amount: selection.filled_amount(),
    })
}
