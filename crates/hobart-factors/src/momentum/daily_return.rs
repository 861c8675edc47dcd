//! One-day return.

use crate::{
    traits::{ADJ_CLOSE, Factor, FactorKind},
    window,
};
use polars::prelude::*;

/// Close-to-close return of the adjusted price:
/// `adj_close[t] / adj_close[t-1] - 1`.
///
/// Undefined on the first row of each ticker.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyReturn;

impl Factor for DailyReturn {
    fn name(&self) -> &'static str {
        "ret_1d"
    }

    fn description(&self) -> &'static str {
        "One-day adjusted close return"
    }

    fn kind(&self) -> FactorKind {
        FactorKind::Feature
    }

    fn lookback(&self) -> usize {
        1
    }

    fn expr(&self) -> Expr {
        window::pct_change(col(ADJ_CLOSE), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TickerHistory;
    use approx::assert_relative_eq;

    #[test]
    fn test_daily_return() {
        let history = TickerHistory {
            ticker: "AAPL".to_string(),
            dates: vec![Default::default(); 3],
            adj_close: vec![50.0, 55.0, 44.0],
            volume: vec![1.0; 3],
        };

        let out = DailyReturn.compute(&history).unwrap();
        assert_eq!(out[0], None);
        assert_relative_eq!(out[1].unwrap(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(out[2].unwrap(), -0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_daily_return_metadata() {
        assert_eq!(DailyReturn.name(), "ret_1d");
        assert_eq!(DailyReturn.kind(), FactorKind::Feature);
        assert_eq!(DailyReturn.lookback(), 1);
        assert_eq!(DailyReturn.lookahead(), 0);
    }
}
