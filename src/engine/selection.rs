use crate::domain::{AmountError, Decimal, OrderBook, RestingOrder, Side};

/// A resting order chosen to fill part of a market order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedOrder {
    pub order: RestingOrder,
    /// Token amount taken from this order, in smallest units.
    pub fill_amount: Decimal,
    /// Base asset paid against this order, in smallest units.
    pub payment: Decimal,
}

/// Result of walking the book for a market order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSelection {
    pub orders: Vec<SelectedOrder>,
    /// True when the selected orders cover the full requested amount.
    pub fully_fillable: bool,
    filled: Decimal,
}

impl OrderSelection {
    /// Token amount covered by the selected orders, in smallest units.
    pub fn filled_amount(&self) -> Decimal {
        self.filled
    }

    pub fn total_payment(&self) -> Result<Decimal, AmountError> {
        Decimal::checked_sum(self.orders.iter().map(|s| s.payment))
    }

    /// Sum of the protocol fees of every selected order.
    pub fn total_maker_fee(&self) -> Result<Decimal, AmountError> {
        Decimal::checked_sum(self.orders.iter().map(|s| s.order.maker_fee))
    }

    pub fn payments(&self) -> Vec<Decimal> {
        self.orders.iter().map(|s| s.payment).collect()
    }
}

/// Greedily select resting orders, best price first, until `amount` is met.
///
/// The last order taken is only partially consumed when it holds more than
/// is still needed, so the selection never fills more than requested.
/// Orders with nothing left to fill are skipped. Amounts or payments too
/// large to represent fail with [`AmountError::Overflow`].
pub fn select_orders_to_fill(
    amount: Decimal,
    side: Side,
    book: &OrderBook,
) -> Result<OrderSelection, AmountError> {
    let mut orders = Vec::new();
    let mut filled = Decimal::zero();

    for order in book.liquidity_for(side) {
        if filled >= amount {
            break;
        }
        let available = order.remaining();
        if available.is_zero() {
            continue;
        }

        let fill_amount = available.min(amount.checked_sub(filled)?);
        filled = filled.checked_add(fill_amount)?;
        orders.push(SelectedOrder {
            order: order.clone(),
            fill_amount,
            payment: fill_amount.checked_mul(order.price)?,
        });
    }

    Ok(OrderSelection {
        orders,
        fully_fillable: filled == amount,
        filled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn ask(hash: &str, price: &str, size: &str, fee: &str) -> RestingOrder {
        RestingOrder::new(hash, Side::Sell, d(price), d(size), d(fee))
    }

    #[test]
    fn test_single_order_partial_take() {
        let book = OrderBook::new(vec![], vec![ask("a", "2", "10", "1")]);
        let selection = select_orders_to_fill(d("4"), Side::Buy, &book).unwrap();

        assert!(selection.fully_fillable);
        assert_eq!(selection.orders.len(), 1);
        assert_eq!(selection.orders[0].fill_amount, d("4"));
        assert_eq!(selection.orders[0].payment, d("8"));
        assert_eq!(selection.total_maker_fee().unwrap(), d("1"));
    }

    #[test]
    fn test_walks_multiple_levels_best_first() {
        let book = OrderBook::new(
            vec![],
            vec![ask("worse", "3", "10", "2"), ask("best", "1", "5", "1")],
        );
        let selection = select_orders_to_fill(d("8"), Side::Buy, &book).unwrap();

        assert!(selection.fully_fillable);
        let hashes: Vec<_> = selection.orders.iter().map(|s| s.order.order_hash.as_str()).collect();
        assert_eq!(hashes, vec!["best", "worse"]);
        assert_eq!(selection.payments(), vec![d("5"), d("9")]);
        assert_eq!(selection.total_payment().unwrap(), d("14"));
        assert_eq!(selection.filled_amount(), d("8"));
    }

    #[test]
    fn test_stops_once_filled() {
        let book = OrderBook::new(
            vec![],
            vec![ask("a", "1", "5", "1"), ask("b", "1", "5", "1")],
        );
        let selection = select_orders_to_fill(d("5"), Side::Buy, &book).unwrap();
        assert_eq!(selection.orders.len(), 1);
        assert!(selection.fully_fillable);
    }

    #[test]
    fn test_skips_exhausted_orders() {
        let book = OrderBook::new(
            vec![],
            vec![
                ask("done", "1", "5", "9").with_filled(d("5")),
                ask("live", "2", "5", "1"),
            ],
        );
        let selection = select_orders_to_fill(d("3"), Side::Buy, &book).unwrap();
        assert_eq!(selection.orders.len(), 1);
        assert_eq!(selection.orders[0].order.order_hash, "live");
        assert_eq!(selection.total_maker_fee().unwrap(), d("1"));
    }

    #[test]
    fn test_sell_consumes_bids() {
        let book = OrderBook::from_orders(vec![
            RestingOrder::new("bid", Side::Buy, d("0.5"), d("10"), d("0")),
            ask("ask", "0.6", "10", "0"),
        ]);
        let selection = select_orders_to_fill(d("2"), Side::Sell, &book).unwrap();
        assert_eq!(selection.orders[0].order.order_hash, "bid");
        assert_eq!(selection.total_payment().unwrap(), d("1"));
    }

    #[test]
    fn test_insufficient_depth() {
        let book = OrderBook::new(vec![], vec![ask("a", "1", "3", "0")]);
        let selection = select_orders_to_fill(d("5"), Side::Buy, &book).unwrap();
        assert!(!selection.fully_fillable);
        assert_eq!(selection.filled_amount(), d("3"));
    }

    #[test]
    fn test_empty_book() {
        let selection = select_orders_to_fill(d("5"), Side::Buy, &OrderBook::empty()).unwrap();
        assert!(!selection.fully_fillable);
        assert!(selection.orders.is_empty());
        assert_eq!(selection.total_payment().unwrap(), Decimal::zero());
    }

    #[test]
    fn test_oversized_payment_is_an_error() {
        let book = OrderBook::new(vec![], vec![ask("a", "100", "10000000000000000000000000000", "0")]);
        let err = select_orders_to_fill(d("10000000000000000000000000000"), Side::Buy, &book).unwrap_err();
        assert_eq!(err, AmountError::Overflow("mul"));
    }

    #[test]
    fn test_overflowing_fee_total_is_an_error() {
        let max = "79228162514264337593543950335";
        let book = OrderBook::new(
            vec![],
            vec![ask("a", "0", "1", max), ask("b", "0", "1", max)],
        );
        let selection = select_orders_to_fill(d("2"), Side::Buy, &book).unwrap();
        assert_eq!(selection.total_maker_fee(), Err(AmountError::Overflow("add")));
    }
}
