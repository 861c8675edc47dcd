//! Realized return volatility.

use crate::{
    traits::{ADJ_CLOSE, Factor, FactorKind},
    window,
};
use polars::prelude::*;

/// Sample standard deviation of one-day returns over a trailing window,
/// not annualized.
///
/// With a 20-day window the first defined value is at row 20, since
/// `ret_1d` itself is undefined at row 0.
#[derive(Debug, Clone, Copy)]
pub struct ReturnVolatility {
    window: usize,
}

impl ReturnVolatility {
    /// Volatility over `window` daily returns.
    pub const fn new(window: usize) -> Self {
        Self { window }
    }
}

impl Default for ReturnVolatility {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Factor for ReturnVolatility {
    fn name(&self) -> &'static str {
        "vol_20d"
    }

    fn description(&self) -> &'static str {
        "20-day sample standard deviation of daily returns"
    }

    fn kind(&self) -> FactorKind {
        FactorKind::Feature
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn expr(&self) -> Expr {
        window::rolling_std(window::pct_change(col(ADJ_CLOSE), 1), self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TickerHistory;
    use approx::assert_relative_eq;

    #[test]
    fn test_vol_first_defined_row() {
        let n = 25;
        let history = TickerHistory {
            ticker: "X".to_string(),
            dates: vec![Default::default(); n],
            adj_close: (0..n).map(|i| 100.0 + (i % 3) as f64).collect(),
            volume: vec![1.0; n],
        };

        let out = ReturnVolatility::default().compute(&history).unwrap();
        assert!(out[..20].iter().all(Option::is_none));
        assert!(out[20..].iter().all(|v| v.is_some_and(|x| x > 0.0)));
    }

    #[test]
    fn test_vol_of_constant_growth_is_zero() {
        let n = 21;
        let history = TickerHistory {
            ticker: "X".to_string(),
            dates: vec![Default::default(); n],
            adj_close: (0..n).map(|i| 2.0_f64.powi(i as i32)).collect(),
            volume: vec![1.0; n],
        };

        let out = ReturnVolatility::default().compute(&history).unwrap();
        assert_relative_eq!(out[20].unwrap(), 0.0, epsilon = 1e-12);
    }
}
