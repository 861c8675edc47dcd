//! Price momentum over a fixed trailing window.

use crate::{
    traits::{ADJ_CLOSE, Factor, FactorKind},
    window,
};
use polars::prelude::*;

/// Price momentum: `adj_close[t] / adj_close[t-lookback] - 1`.
///
/// Two instances are used by the engine: 20-day (`mom_20d`) and 60-day
/// (`mom_60d`). The 60-day window sets the warm-up of the whole factor table.
#[derive(Debug, Clone, Copy)]
pub struct PriceMomentum {
    name: &'static str,
    lookback: usize,
}

impl PriceMomentum {
    /// Momentum over `lookback` trading days, reported as column `name`.
    pub const fn new(name: &'static str, lookback: usize) -> Self {
        Self { name, lookback }
    }

    /// 20-day momentum (`mom_20d`).
    pub const fn twenty_day() -> Self {
        Self::new("mom_20d", 20)
    }

    /// 60-day momentum (`mom_60d`).
    pub const fn sixty_day() -> Self {
        Self::new("mom_60d", 60)
    }
}

impl Factor for PriceMomentum {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        match self.lookback {
            20 => "20-day adjusted close momentum",
            60 => "60-day adjusted close momentum",
            _ => "Adjusted close momentum",
        }
    }

    fn kind(&self) -> FactorKind {
        FactorKind::Feature
    }

    fn lookback(&self) -> usize {
        self.lookback
    }

    fn expr(&self) -> Expr {
        window::pct_change(col(ADJ_CLOSE), self.lookback)
    }
}
