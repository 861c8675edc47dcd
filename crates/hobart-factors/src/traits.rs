//! Core trait definitions for factors.
//!
//! A factor is a polars expression over one ticker's chronological history,
//! yielding one value per row. Factors never see another ticker's data.

use crate::{error::Result, window};
use chrono::NaiveDate;
use derive_more::Display;
use hobart_data::TickerPartition;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Adjusted close column of a ticker history frame.
pub const ADJ_CLOSE: &str = "adj_close";

/// Volume column of a ticker history frame.
pub const VOLUME: &str = "volume";

/// Whether a factor is usable as a model input at its own date.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorKind {
    /// Causal: computed only from rows at or before `t`
    #[display("feature")]
    Feature,
    /// Forward-looking: reads rows after `t`; a training target only
    #[display("label")]
    Label,
}

/// One ticker's price history, columnar, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerHistory {
    /// Ticker shared by every row.
    pub ticker: String,
    /// Trading dates, strictly increasing.
    pub dates: Vec<NaiveDate>,
    /// Adjusted closes, `NaN` where missing.
    pub adj_close: Vec<f64>,
    /// Volumes, `NaN` where missing.
    pub volume: Vec<f64>,
}

impl TickerHistory {
    /// Number of trading days.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// [`ADJ_CLOSE`] and [`VOLUME`] as a lazy frame, with `NaN` as null.
    pub fn to_lazy(&self) -> Result<LazyFrame> {
        let df = DataFrame::new(vec![
            Column::new(ADJ_CLOSE.into(), window::lift(&self.adj_close)),
            Column::new(VOLUME.into(), window::lift(&self.volume)),
        ])?;
        Ok(df.lazy())
    }

    /// Evaluate `exprs` in one pass, one column of values per expression.
    ///
    /// Null and `NaN` results are `None`.
    pub fn evaluate(&self, exprs: &[Expr]) -> Result<Vec<Vec<Option<f64>>>> {
        let aliased: Vec<Expr> = exprs
            .iter()
            .enumerate()
            .map(|(i, expr)| expr.clone().alias(format!("f{i}")))
            .collect();
        let out = self.to_lazy()?.select(aliased).collect()?;

        out.get_columns()
            .iter()
            .map(|column| -> Result<Vec<Option<f64>>> {
                let values = column.as_materialized_series().cast(&DataType::Float64)?;
                Ok(values.f64()?.into_iter().map(|v| v.and_then(window::defined)).collect())
            })
            .collect()
    }
}

impl From<&TickerPartition<'_>> for TickerHistory {
    fn from(partition: &TickerPartition<'_>) -> Self {
        Self {
            ticker: partition.ticker.to_string(),
            dates: partition.points.iter().map(|p| p.date).collect(),
            adj_close: partition.points.iter().map(|p| p.adj_close).collect(),
            volume: partition.points.iter().map(|p| p.volume).collect(),
        }
    }
}

/// A per-ticker factor.
pub trait Factor: Send + Sync + std::fmt::Debug {
    /// Output column name. Stable, snake_case.
    fn name(&self) -> &'static str;

    /// Human-readable description of what this factor measures.
    fn description(&self) -> &'static str;

    /// Feature or label.
    fn kind(&self) -> FactorKind;

    /// Prior rows needed before the first defined value.
    fn lookback(&self) -> usize;

    /// Future rows read at each date. Non-zero only for labels.
    fn lookahead(&self) -> usize {
        0
    }

    /// Expression over [`ADJ_CLOSE`] and [`VOLUME`], one value per row.
    fn expr(&self) -> Expr;

    /// One value per row of `history`; `None` where undefined.
    fn compute(&self, history: &TickerHistory) -> Result<Vec<Option<f64>>> {
        let mut columns = history.evaluate(&[self.expr()])?;
        Ok(columns.pop().unwrap_or_default())
    }
}
