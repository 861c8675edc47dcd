//! Dollar volume.

use crate::{
    liquidity::AverageDailyVolume,
    traits::{ADJ_CLOSE, Factor, FactorKind},
};
use polars::prelude::*;

/// Average daily volume scaled by the current adjusted close:
/// `adv[t] * adj_close[t]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DollarVolume {
    adv: AverageDailyVolume,
}

impl DollarVolume {
    /// Dollar volume over `window` trading days.
    pub const fn new(window: usize) -> Self {
        Self { adv: AverageDailyVolume::new(window) }
    }
}

impl Factor for DollarVolume {
    fn name(&self) -> &'static str {
        "dollar_vol_20d"
    }

    fn description(&self) -> &'static str {
        "20-day average daily volume times the adjusted close"
    }

    fn kind(&self) -> FactorKind {
        FactorKind::Feature
    }

    fn lookback(&self) -> usize {
        self.adv.lookback()
    }

    fn expr(&self) -> Expr {
        self.adv.expr() * col(ADJ_CLOSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TickerHistory;
    use approx::assert_relative_eq;

    #[test]
    fn test_dollar_volume_uses_current_price() {
        let history = TickerHistory {
            ticker: "X".to_string(),
            dates: vec![Default::default(); 3],
            adj_close: vec![10.0, 20.0, 40.0],
            volume: vec![100.0, 300.0, 500.0],
        };

        let out = DollarVolume::new(2).compute(&history).unwrap();
        assert_eq!(out[0], None);
        assert_relative_eq!(out[1].unwrap(), 200.0 * 20.0);
        assert_relative_eq!(out[2].unwrap(), 400.0 * 40.0);
    }

    #[test]
    fn test_missing_price_is_undefined() {
        let history = TickerHistory {
            ticker: "X".to_string(),
            dates: vec![Default::default(); 2],
            adj_close: vec![10.0, f64::NAN],
            volume: vec![100.0, 300.0],
        };

        assert_eq!(DollarVolume::new(2).compute(&history).unwrap(), vec![None, None]);
    }
}
