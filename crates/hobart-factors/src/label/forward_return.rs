//! Forward return label.

use crate::{
    traits::{ADJ_CLOSE, Factor, FactorKind},
    window,
};
use polars::prelude::*;

/// Return over the next `horizon` trading days:
/// `adj_close[t + horizon] / adj_close[t] - 1`.
///
/// Undefined on the last `horizon` rows of each ticker.
#[derive(Debug, Clone, Copy)]
pub struct ForwardReturn {
    horizon: usize,
}

impl ForwardReturn {
    /// Forward return over `horizon` trading days.
    pub const fn new(horizon: usize) -> Self {
        Self { horizon }
    }
}

impl Default for ForwardReturn {
    fn default() -> Self {
        Self::new(5)
    }
}

impl Factor for ForwardReturn {
    fn name(&self) -> &'static str {
        "ret_fwd_5d"
    }

    fn description(&self) -> &'static str {
        "Five-day forward adjusted close return (label)"
    }

    fn kind(&self) -> FactorKind {
        FactorKind::Label
    }

    fn lookback(&self) -> usize {
        0
    }

    fn lookahead(&self) -> usize {
        self.horizon
    }

    fn expr(&self) -> Expr {
        window::forward_change(col(ADJ_CLOSE), self.horizon)
    }
}
