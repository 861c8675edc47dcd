//! Window expressions over a single ticker's chronological series.
//!
//! Every builder returns a polars [`Expr`] evaluated against one ticker's
//! history, so row `t` sees a fixed-size window ending at (or, for
//! [`forward_change`], starting at) `t`, counted in trading days. Missing
//! inputs are null; a window containing a null is null. Rolling statistics
//! need the whole window (`min_periods == window`).

use polars::prelude::*;

/// `Some(v)` unless `v` is `NaN`.
///
/// Infinities stay defined; judging them is the validator's job.
pub fn defined(v: f64) -> Option<f64> {
    (!v.is_nan()).then_some(v)
}

/// Lift a raw series into the defined/undefined domain.
pub fn lift(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(defined).collect()
}

/// Fixed window of `window` rows that must all be present.
pub fn fixed(window: usize) -> RollingOptionsFixedWindow {
    RollingOptionsFixedWindow {
        window_size: window,
        min_periods: window,
        ..Default::default()
    }
}

/// `x[t] / x[t - periods] - 1`, null for the first `periods` rows.
pub fn pct_change(expr: Expr, periods: usize) -> Expr {
    expr.clone() / expr.shift(lit(periods as i64)) - lit(1.0)
}

/// `x[t + periods] / x[t] - 1`, null for the last `periods` rows.
pub fn forward_change(expr: Expr, periods: usize) -> Expr {
    expr.clone().shift(lit(-(periods as i64))) / expr - lit(1.0)
}

/// Whether every value in the trailing window is equal.
///
/// Running sums do not cancel exactly for most prices, so a flat window is
/// detected directly.
fn is_flat(expr: &Expr, window: usize) -> Expr {
    expr.clone()
        .rolling_max(fixed(window))
        .eq(expr.clone().rolling_min(fixed(window)))
}

/// Trailing mean over `window` rows ending at `t`. A flat window's mean is
/// exactly its value.
pub fn rolling_mean(expr: Expr, window: usize) -> Expr {
    when(is_flat(&expr, window))
        .then(expr.clone())
        .otherwise(expr.rolling_mean(fixed(window)))
}

/// Trailing sample standard deviation (ddof = 1) over `window` rows ending at
/// `t`. A flat window's deviation is exactly zero.
pub fn rolling_std(expr: Expr, window: usize) -> Expr {
    when(is_flat(&expr, window))
        .then(lit(0.0))
        .otherwise(expr.rolling_std(fixed(window)))
}
