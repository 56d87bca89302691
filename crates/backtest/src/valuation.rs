//! Portfolio valuation.
//!
//! Marks a position vector to market with side-aware pricing.

use ndarray::ArrayView1;

/// Mark a portfolio to market.
///
/// Long lots are valued at the bid (the price a seller would receive) and
/// short lots at the ask (the price paid to buy the position back), so each
/// security contributes at the side it would actually be closed at. Zero
/// positions contribute zero regardless of price.
pub fn portfolio_value(
    cash: f64,
    position: ArrayView1<f64>,
    bid_price: ArrayView1<f64>,
    ask_price: ArrayView1<f64>,
) -> f64 {
    let mut value = cash;
    for ((&pos, &bid), &ask) in position.iter().zip(bid_price.iter()).zip(ask_price.iter()) {
        if pos > 0.0 {
            value += pos * bid;
        } else if pos < 0.0 {
            value += pos * ask;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_empty_portfolio_is_cash() {
        let position = array![0.0, 0.0];
        let bid = array![10.0, 20.0];
        let ask = array![11.0, 21.0];

        let value = portfolio_value(1000.0, position.view(), bid.view(), ask.view());
        assert_relative_eq!(value, 1000.0);

        let zero = portfolio_value(0.0, position.view(), bid.view(), ask.view());
        assert_relative_eq!(zero, 0.0);
    }

    #[test]
    fn test_long_at_bid_short_at_ask() {
        let position = array![5.0, -3.0];
        let bid = array![10.0, 20.0];
        let ask = array![11.0, 21.0];

        // 100 + 5*10 - 3*21
        let value = portfolio_value(100.0, position.view(), bid.view(), ask.view());
        assert_relative_eq!(value, 100.0 + 50.0 - 63.0);
    }

    #[test]
    fn test_additivity_over_legs() {
        let bid = array![10.0, 20.0, 30.0];
        let ask = array![10.5, 20.5, 30.5];

        let long_only = array![2.0, 0.0, 1.0];
        let short_only = array![0.0, -4.0, 0.0];
        let combined = array![2.0, -4.0, 1.0];

        let v_long = portfolio_value(0.0, long_only.view(), bid.view(), ask.view());
        let v_short = portfolio_value(0.0, short_only.view(), bid.view(), ask.view());
        let v_both = portfolio_value(0.0, combined.view(), bid.view(), ask.view());

        assert_relative_eq!(v_long + v_short, v_both);
    }
}
