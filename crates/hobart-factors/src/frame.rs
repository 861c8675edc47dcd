//! The factor table produced by the engine.
//!
//! Every [`FactorRow`] is dense: all eight factor values are defined. The
//! forward label lives in its own [`Label`] struct so it cannot be mistaken
//! for a causal feature.

use crate::{error::Result, traits::FactorKind};
use chrono::NaiveDate;
use derive_more::Display;
use hobart_data::dates::date_to_days;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The eight factor columns, in output order.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FactorColumn {
    /// One-day return
    #[display("ret_1d")]
    #[serde(rename = "ret_1d")]
    Ret1d,
    /// Five-day forward return (label)
    #[display("ret_fwd_5d")]
    #[serde(rename = "ret_fwd_5d")]
    RetFwd5d,
    /// 20-day momentum
    #[display("mom_20d")]
    #[serde(rename = "mom_20d")]
    Mom20d,
    /// 60-day momentum
    #[display("mom_60d")]
    #[serde(rename = "mom_60d")]
    Mom60d,
    /// 20-day return volatility
    #[display("vol_20d")]
    #[serde(rename = "vol_20d")]
    Vol20d,
    /// 20-day price z-score
    #[display("zscore_20d_price")]
    #[serde(rename = "zscore_20d_price")]
    ZScore20dPrice,
    /// 20-day average daily volume
    #[display("adv_20d")]
    #[serde(rename = "adv_20d")]
    Adv20d,
    /// 20-day dollar volume
    #[display("dollar_vol_20d")]
    #[serde(rename = "dollar_vol_20d")]
    DollarVol20d,
}

impl FactorColumn {
    /// All columns in output order.
    pub const ALL: [Self; 8] = [
        Self::Ret1d,
        Self::RetFwd5d,
        Self::Mom20d,
        Self::Mom60d,
        Self::Vol20d,
        Self::ZScore20dPrice,
        Self::Adv20d,
        Self::DollarVol20d,
    ];

    /// Column name in the output table.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ret1d => "ret_1d",
            Self::RetFwd5d => "ret_fwd_5d",
            Self::Mom20d => "mom_20d",
            Self::Mom60d => "mom_60d",
            Self::Vol20d => "vol_20d",
            Self::ZScore20dPrice => "zscore_20d_price",
            Self::Adv20d => "adv_20d",
            Self::DollarVol20d => "dollar_vol_20d",
        }
    }

    /// Feature or label.
    pub const fn kind(self) -> FactorKind {
        match self {
            Self::RetFwd5d => FactorKind::Label,
            _ => FactorKind::Feature,
        }
    }

    /// Look up a column by its output name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Causal features: every value depends only on rows at or before the row's date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// One-day return
    pub ret_1d: f64,
    /// 20-day momentum
    pub mom_20d: f64,
    /// 60-day momentum
    pub mom_60d: f64,
    /// 20-day sample volatility of `ret_1d`
    pub vol_20d: f64,
    /// 20-day price z-score
    pub zscore_20d_price: f64,
    /// 20-day average daily volume
    pub adv_20d: f64,
    /// `adv_20d * adj_close`
    pub dollar_vol_20d: f64,
}

/// Forward-looking training target. Never a model input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Return over the next five trading days
    pub ret_fwd_5d: f64,
}

/// One dense output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorRow {
    /// Trading date
    pub date: NaiveDate,
    /// Ticker symbol
    pub ticker: String,
    /// Causal features at `date`
    pub features: Features,
    /// Label at `date`
    pub label: Label,
}

impl FactorRow {
    /// Value of a single factor column.
    pub const fn value(&self, column: FactorColumn) -> f64 {
        let f = &self.features;
        match column {
            FactorColumn::Ret1d => f.ret_1d,
            FactorColumn::RetFwd5d => self.label.ret_fwd_5d,
            FactorColumn::Mom20d => f.mom_20d,
            FactorColumn::Mom60d => f.mom_60d,
            FactorColumn::Vol20d => f.vol_20d,
            FactorColumn::ZScore20dPrice => f.zscore_20d_price,
            FactorColumn::Adv20d => f.adv_20d,
            FactorColumn::DollarVol20d => f.dollar_vol_20d,
        }
    }
}

/// Immutable factor table sorted by `(ticker, date)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactorFrame {
    rows: Vec<FactorRow>,
}

impl FactorFrame {
    /// Wrap rows that are already in `(ticker, date)` order.
    pub const fn new(rows: Vec<FactorRow>) -> Self {
        Self { rows }
    }

    /// All rows.
    pub fn rows(&self) -> &[FactorRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct tickers, sorted.
    pub fn tickers(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.ticker.as_str()).collect()
    }

    /// Number of distinct tickers.
    pub fn ticker_count(&self) -> usize {
        self.tickers().len()
    }

    /// Earliest and latest date, `None` when empty.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|r| r.date).min()?;
        let max = self.rows.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// One factor column as a vector, in row order.
    pub fn column(&self, column: FactorColumn) -> Vec<f64> {
        self.rows.iter().map(|r| r.value(column)).collect()
    }

    /// The output table: `date, ticker` followed by the eight factor columns.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let days: Vec<i32> = self.rows.iter().map(|r| date_to_days(r.date)).collect();
        let tickers: Vec<&str> = self.rows.iter().map(|r| r.ticker.as_str()).collect();

        let mut columns = Vec::with_capacity(2 + FactorColumn::ALL.len());
        columns.push(Column::new("date".into(), days).cast(&DataType::Date)?);
        columns.push(Column::new("ticker".into(), tickers));
        for column in FactorColumn::ALL {
            columns.push(Column::new(column.name().into(), self.column(column)));
        }

        Ok(DataFrame::new(columns)?)
    }

    /// `date, ticker` plus the seven causal feature columns.
    pub fn features_frame(&self) -> Result<DataFrame> {
        self.select_kind(FactorKind::Feature)
    }

    /// `date, ticker` plus the label column.
    pub fn labels_frame(&self) -> Result<DataFrame> {
        self.select_kind(FactorKind::Label)
    }

    fn select_kind(&self, kind: FactorKind) -> Result<DataFrame> {
        let names = ["date", "ticker"].into_iter().chain(
            FactorColumn::ALL
                .into_iter()
                .filter(|c| c.kind() == kind)
                .map(FactorColumn::name),
        );
        Ok(self.to_dataframe()?.select(names)?)
    }
}

impl FromIterator<FactorRow> for FactorFrame {
    fn from_iter<I: IntoIterator<Item = FactorRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
