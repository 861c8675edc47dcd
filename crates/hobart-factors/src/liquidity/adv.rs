//! Average daily volume.

use crate::{
    traits::{Factor, FactorKind, VOLUME},
    window,
};
use polars::prelude::*;

/// Trailing mean of share volume over a fixed window, including `t`.
#[derive(Debug, Clone, Copy)]
pub struct AverageDailyVolume {
    window: usize,
}

impl AverageDailyVolume {
    /// Average over `window` trading days.
    pub const fn new(window: usize) -> Self {
        Self { window }
    }
}

impl Default for AverageDailyVolume {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Factor for AverageDailyVolume {
    fn name(&self) -> &'static str {
        "adv_20d"
    }

    fn description(&self) -> &'static str {
        "20-day average daily share volume"
    }

    fn kind(&self) -> FactorKind {
        FactorKind::Feature
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn expr(&self) -> Expr {
        window::rolling_mean(col(VOLUME), self.window)
    }
}
