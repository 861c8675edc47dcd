//! Price z-score against its trailing distribution.

use crate::{
    traits::{ADJ_CLOSE, Factor, FactorKind},
    window,
};
use polars::prelude::*;

/// `(adj_close[t] - mean) / std` over the trailing window of adjusted
/// closes, including `t`.
///
/// A window of equal prices has mean equal to the price and zero deviation,
/// so its z-score is `0 / 0`: undefined, and the row is dropped.
#[derive(Debug, Clone, Copy)]
pub struct PriceZScore {
    window: usize,
}

impl PriceZScore {
    /// Z-score over `window` adjusted closes.
    pub const fn new(window: usize) -> Self {
        Self { window }
    }
}

impl Default for PriceZScore {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Factor for PriceZScore {
    fn name(&self) -> &'static str {
        "zscore_20d_price"
    }

    fn description(&self) -> &'static str {
        "Adjusted close in units of its 20-day rolling standard deviation from the 20-day mean"
    }

    fn kind(&self) -> FactorKind {
        FactorKind::Feature
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn expr(&self) -> Expr {
        let price = col(ADJ_CLOSE);
        (price.clone() - window::rolling_mean(price.clone(), self.window))
            / window::rolling_std(price, self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TickerHistory;
    use approx::assert_relative_eq;

    fn history(prices: Vec<f64>) -> TickerHistory {
        let n = prices.len();
        TickerHistory {
            ticker: "X".to_string(),
            dates: vec![Default::default(); n],
            adj_close: prices,
            volume: vec![1.0; n],
        }
    }

    #[test]
    fn test_zscore_of_linear_trend() {
        let out = PriceZScore::new(3).compute(&history(vec![1.0, 2.0, 3.0, 4.0])).unwrap();

        assert_eq!(&out[..2], &[None, None]);
        // window [1,2,3]: mean 2, sample std 1
        assert_relative_eq!(out[2].unwrap(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(out[3].unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_flat_window_is_undefined() {
        let out = PriceZScore::new(3).compute(&history(vec![5.0, 5.0, 5.0])).unwrap();
        assert_eq!(out[2], None);
    }

    #[test]
    fn test_flat_run_after_moves_is_undefined() {
        // 100.37 does not sum exactly; running sums leave a residue of ~1e-14
        let mut prices: Vec<f64> = (0..30).map(|i| 90.0 + (i as f64 * 0.9).sin() * 4.0).collect();
        prices.extend([100.37; 30]);

        let out = PriceZScore::default().compute(&history(prices)).unwrap();
        assert!(out[19..49].iter().all(Option::is_some));
        assert!(out[49..].iter().all(Option::is_none));
    }

    #[test]
    fn test_zscore_lookback() {
        assert_eq!(PriceZScore::default().lookback(), 19);
    }
}
