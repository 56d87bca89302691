//! Time-aligned market grids.
//!
//! The bid-price frame establishes the canonical time index and security
//! universe; every other grid (supplied or defaulted) shares that shape.

use gridsim_core::{Frame, Result, TimestampMs, Universe, UNLIMITED_SIZE};
use ndarray::{Array2, ArrayView1};

/// Bid/ask price and size grids over a fixed universe.
#[derive(Debug, Clone)]
pub struct MarketData {
    index: Vec<TimestampMs>,
    securities: Universe,
    bid_price: Array2<f64>,
    ask_price: Array2<f64>,
    bid_size: Array2<f64>,
    ask_size: Array2<f64>,
}

impl MarketData {
    /// Build market data from a bid-price frame.
    ///
    /// Until overridden, the ask price equals the bid (single-price market)
    /// and both size grids are unlimited.
    pub fn new(bid_price: Frame) -> Self {
        let index = bid_price.index().to_vec();
        let securities = Universe::new(bid_price.columns().to_vec());
        let bid_price = bid_price.into_values();
        let ask_price = bid_price.clone();
        let bid_size = Array2::from_elem(bid_price.raw_dim(), UNLIMITED_SIZE);
        let ask_size = bid_size.clone();

        Self {
            index,
            securities,
            bid_price,
            ask_price,
            bid_size,
            ask_size,
        }
    }

    /// Install an ask-price grid, validating its labels.
    pub fn with_ask_price(mut self, frame: Frame) -> Result<Self> {
        self.ask_price = self.conform(frame)?;
        Ok(self)
    }

    /// Install a bid-size grid, validating its labels.
    pub fn with_bid_size(mut self, frame: Frame) -> Result<Self> {
        self.bid_size = self.conform(frame)?;
        Ok(self)
    }

    /// Install an ask-size grid, validating its labels.
    pub fn with_ask_size(mut self, frame: Frame) -> Result<Self> {
        self.ask_size = self.conform(frame)?;
        Ok(self)
    }

    /// Validate a frame against the canonical labels and take its values.
    pub fn conform(&self, frame: Frame) -> Result<Array2<f64>> {
        frame.conform(&self.index, self.securities.labels())
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.index.len()
    }

    /// Canonical time index.
    pub fn index(&self) -> &[TimestampMs] {
        &self.index
    }

    /// Security universe.
    pub fn securities(&self) -> &Universe {
        &self.securities
    }

    /// Bid prices at one step.
    pub fn bid_price_row(&self, step: usize) -> ArrayView1<'_, f64> {
        self.bid_price.row(step)
    }

    /// Ask prices at one step.
    pub fn ask_price_row(&self, step: usize) -> ArrayView1<'_, f64> {
        self.ask_price.row(step)
    }

    /// Bid sizes at one step.
    pub fn bid_size_row(&self, step: usize) -> ArrayView1<'_, f64> {
        self.bid_size.row(step)
    }

    /// Ask sizes at one step.
    pub fn ask_size_row(&self, step: usize) -> ArrayView1<'_, f64> {
        self.ask_size.row(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsim_core::Error;
    use ndarray::array;

    fn bid_frame() -> Frame {
        Frame::new(
            vec![1000, 2000],
            vec!["AAA".to_string(), "BBB".to_string()],
            array![[10.0, 20.0], [11.0, 21.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let market = MarketData::new(bid_frame());

        assert_eq!(market.steps(), 2);
        assert_eq!(market.securities().len(), 2);
        // Ask defaults to bid, sizes default to unlimited.
        assert_eq!(market.ask_price_row(1), market.bid_price_row(1));
        assert!(market.bid_size_row(0).iter().all(|s| s.is_infinite()));
        assert!(market.ask_size_row(1).iter().all(|s| s.is_infinite()));
    }

    #[test]
    fn test_with_ask_price() {
        let ask = Frame::new(
            vec![1000, 2000],
            vec!["AAA".to_string(), "BBB".to_string()],
            array![[10.5, 20.5], [11.5, 21.5]],
        )
        .unwrap();

        let market = MarketData::new(bid_frame()).with_ask_price(ask).unwrap();
        assert_eq!(market.ask_price_row(0)[0], 10.5);
        assert_eq!(market.bid_price_row(0)[0], 10.0);
    }

    #[test]
    fn test_mislabeled_grid_rejected() {
        let bad_size = Frame::new(
            vec![1000, 2000],
            vec!["AAA".to_string(), "CCC".to_string()],
            array![[1.0, 1.0], [1.0, 1.0]],
        )
        .unwrap();

        let res = MarketData::new(bid_frame()).with_bid_size(bad_size);
        assert!(matches!(res, Err(Error::ColumnMismatch(_))));
    }
}
