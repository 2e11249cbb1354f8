use order_cost::engine::compute_limit_cost;
use order_cost::{
    Decimal, MockOrderBookSource, MockPriceSource, OrderCostCalculator, OrderDetails, Quote, Side,
    Token, TradeRequest,
};
use std::sync::Arc;

fn d(s: &str) -> Decimal {
    Decimal::from_str_canonical(s).unwrap()
}

fn calculator(maker_fee: &str, prices: MockPriceSource) -> OrderCostCalculator {
    OrderCostCalculator::new(
        Arc::new(prices),
        Arc::new(MockOrderBookSource::new()),
        d(maker_fee),
    )
}

#[tokio::test]
async fn test_limit_order_reference_figures() {
    let calc = calculator("1", MockPriceSource::new(d("0.0005"), d("0.35"), d("700")));
    let request = TradeRequest::limit(
        Side::Buy,
        Token::new("ZRX", 18),
        d("10000000000000000000"),
        d("0.01"),
    );

    let details = calc.compute_cost(&request).await.unwrap();
    let OrderDetails::Limit(breakdown) = details else {
        panic!("expected a limit breakdown, got {details:?}");
    };
    let cost = breakdown.cost;

    assert_eq!(cost.fee_in_base, d("0.0005"));
    assert_eq!(cost.total_cost_in_base, d("0.1005"));
    assert_eq!(cost.fee_in_fiat, d("0.35"));
    assert_eq!(cost.total_cost_in_fiat, d("70.35"));
    assert_eq!(cost.fee_in_protocol_token, d("1"));
    assert!(cost.fillable);
}

#[test]
fn test_limit_total_is_notional_plus_fee_exactly() {
    let cases = [
        // (amount in base units, decimals, unit price, fee, fee token price in base)
        ("1", 0, "0.1", "0.2", "1"),
        ("123456789", 6, "0.000333", "2.5", "0.00041"),
        ("5000000000000000000", 18, "17.123456789", "0", "0.001"),
        ("0", 18, "0.5", "1", "0.0005"),
    ];

    for (amount, decimals, price, fee, fee_in_base) in cases {
        let quote = Quote::new(d(fee_in_base), d("1"), d("1"));
        let breakdown = compute_limit_cost(d(amount), decimals, d(price), d(fee), &quote).unwrap();

        let human = Decimal::from_base_units(d(amount), decimals).unwrap();
        let expected = human * d(price) + d(fee) * d(fee_in_base);
        assert_eq!(
            breakdown.cost.total_cost_in_base, expected,
            "amount={amount} decimals={decimals} price={price}"
        );
    }
}

#[tokio::test]
async fn test_limit_order_uses_configured_maker_fee() {
    let calc = calculator("3", MockPriceSource::new(d("0.001"), d("0.5"), d("1000")));
    let request = TradeRequest::limit(Side::Sell, Token::new("DAI", 18), d("0"), d("1"));

    let details = calc.compute_cost(&request).await.unwrap();
    assert_eq!(details.cost().fee_in_protocol_token, d("3"));
    assert_eq!(details.cost().fee_in_base, d("0.003"));
    assert_eq!(details.cost().fee_in_fiat, d("1.5"));
    assert_eq!(details.cost().total_cost_in_base, d("0.003"));
}

#[tokio::test]
async fn test_limit_order_does_not_touch_the_book() {
    let calc = OrderCostCalculator::new(
        Arc::new(MockPriceSource::default()),
        Arc::new(MockOrderBookSource::new().with_error(order_cost::DataSourceError::RateLimited)),
        d("1"),
    );
    let request = TradeRequest::limit(Side::Buy, Token::new("ZRX", 18), d("1"), d("1"));
    assert!(calc.compute_cost(&request).await.is_ok());
}
