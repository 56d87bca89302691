//! Liquidity-capped order execution with one-step deferral.
//!
//! Resolves a signed order vector against the quoted bid/ask sizes for a
//! single time step. Whatever the book cannot absorb is never an error: the
//! unfilled remainder is returned so the engine can fold it into the next
//! step's order.

use ndarray::{Array1, ArrayView1, Zip};

/// Result of resolving one step's order against available liquidity.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    /// Cash after settling this step's fills.
    pub cash: f64,
    /// Unfilled remainder, to be added into the next step's order.
    pub deferred: Array1<f64>,
    /// Signed quantity actually filled per security.
    pub filled: Array1<f64>,
    /// Position after applying the fills.
    pub position: Array1<f64>,
    /// Per-security cash flow (negative for purchases, positive for sales).
    pub cashflow: Array1<f64>,
}

/// Fill as much of `order` as the quoted sizes allow and defer the rest.
///
/// Buys are capped at `ask_size` and settle at `ask_price`; sell magnitudes
/// are capped at `bid_size` and settle at `bid_price`. A security with zero
/// available liquidity fills nothing and defers the full request. Caps use
/// the full quoted size, so running several engines against one shared market
/// grid would double-count the available liquidity.
pub fn fill_with_deferral(
    bid_price: ArrayView1<f64>,
    ask_price: ArrayView1<f64>,
    bid_size: ArrayView1<f64>,
    ask_size: ArrayView1<f64>,
    cash: f64,
    order: ArrayView1<f64>,
    position: ArrayView1<f64>,
) -> ExecutionOutcome {
    // Split the order into its buy and sell legs and cap each at the size
    // quoted on the side it would trade against.
    let buy_fill = Zip::from(order)
        .and(ask_size)
        .map_collect(|&qty, &avail| qty.max(0.0).min(avail));
    let sell_fill = Zip::from(order)
        .and(bid_size)
        .map_collect(|&qty, &avail| qty.min(0.0).max(-avail));

    // Buys cost cash at the ask; sells generate cash at the bid. The sell leg
    // is negative, so its notional enters with the opposite sign.
    let cashflow = Zip::from(&buy_fill)
        .and(&sell_fill)
        .and(ask_price)
        .and(bid_price)
        .map_collect(|&buy, &sell, &ask, &bid| -(buy * ask + sell * bid));

    let filled = &buy_fill + &sell_fill;
    let deferred = order.to_owned() - &filled;
    let new_position = position.to_owned() + &filled;
    let new_cash = cash + cashflow.sum();

    ExecutionOutcome {
        cash: new_cash,
        deferred,
        filled,
        position: new_position,
        cashflow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gridsim_core::UNLIMITED_SIZE;
    use ndarray::array;

    fn unlimited(n: usize) -> Array1<f64> {
        Array1::from_elem(n, UNLIMITED_SIZE)
    }

    #[test]
    fn test_unlimited_liquidity_fills_everything() {
        let bid = array![10.0, 20.0];
        let ask = array![10.5, 20.5];
        let order = array![3.0, -2.0];
        let position = array![0.0, 0.0];

        let out = fill_with_deferral(
            bid.view(),
            ask.view(),
            unlimited(2).view(),
            unlimited(2).view(),
            1000.0,
            order.view(),
            position.view(),
        );

        assert_eq!(out.filled, order);
        assert!(out.deferred.iter().all(|&q| q == 0.0));
        assert_eq!(out.position, order);
        // Buy 3 @ 10.5, sell 2 @ 20.
        assert_relative_eq!(out.cash, 1000.0 - 31.5 + 40.0);
    }

    #[test]
    fn test_caps_respect_quoted_sizes() {
        let bid = array![10.0, 10.0];
        let ask = array![10.0, 10.0];
        let bid_size = array![4.0, UNLIMITED_SIZE];
        let ask_size = array![UNLIMITED_SIZE, 2.0];
        let order = array![-9.0, 7.0];
        let position = array![9.0, 0.0];

        let out = fill_with_deferral(
            bid.view(),
            ask.view(),
            bid_size.view(),
            ask_size.view(),
            0.0,
            order.view(),
            position.view(),
        );

        // Sell magnitude capped at bid size, buy capped at ask size.
        assert_eq!(out.filled, array![-4.0, 2.0]);
        assert_eq!(out.deferred, array![-5.0, 5.0]);
        assert_eq!(out.position, array![5.0, 2.0]);
    }

    #[test]
    fn test_conservation_filled_plus_deferred() {
        let bid = array![10.0, 12.0, 8.0];
        let ask = array![10.2, 12.1, 8.3];
        let bid_size = array![1.0, 0.0, 100.0];
        let ask_size = array![0.5, 3.0, 0.0];
        let order = array![2.0, -5.0, 1.5];
        let position = array![0.0, 5.0, 0.0];

        let out = fill_with_deferral(
            bid.view(),
            ask.view(),
            bid_size.view(),
            ask_size.view(),
            500.0,
            order.view(),
            position.view(),
        );

        let reassembled = &out.filled + &out.deferred;
        for (a, b) in reassembled.iter().zip(order.iter()) {
            assert_relative_eq!(*a, *b);
        }
    }

    #[test]
    fn test_zero_liquidity_defers_everything() {
        let bid = array![10.0];
        let ask = array![10.0];
        let none = array![0.0];
        let order = array![5.0];
        let position = array![1.0];

        let out = fill_with_deferral(
            bid.view(),
            ask.view(),
            none.view(),
            none.view(),
            100.0,
            order.view(),
            position.view(),
        );

        assert_eq!(out.filled, array![0.0]);
        assert_eq!(out.deferred, order);
        assert_eq!(out.position, position);
        assert_relative_eq!(out.cash, 100.0);
        assert_relative_eq!(out.cashflow[0], 0.0);
    }

    #[test]
    fn test_cashflow_signs_per_security() {
        let bid = array![10.0, 20.0];
        let ask = array![11.0, 21.0];
        let order = array![2.0, -3.0];
        let position = array![0.0, 3.0];

        let out = fill_with_deferral(
            bid.view(),
            ask.view(),
            unlimited(2).view(),
            unlimited(2).view(),
            0.0,
            order.view(),
            position.view(),
        );

        // Buying spends at the ask, selling collects at the bid.
        assert_relative_eq!(out.cashflow[0], -22.0);
        assert_relative_eq!(out.cashflow[1], 60.0);
        assert_relative_eq!(out.cash, 38.0);
    }
}
