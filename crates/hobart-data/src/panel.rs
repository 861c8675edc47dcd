//! Normalized price panel types.
//!
//! A [`PricePanel`] is the immutable output of the loader: one [`PricePoint`]
//! per raw row, in the row order of the source table. Ordering and key
//! uniqueness are checked separately by [`crate::validate_prices`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Columns every raw price table must carry.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "date",
    "ticker",
    "open",
    "high",
    "low",
    "close",
    "adj_close",
    "volume",
];

/// Numeric columns, all stored as `f64` after loading.
pub const PRICE_COLUMNS: [&str; 6] = ["open", "high", "low", "close", "adj_close", "volume"];

/// A single daily OHLCV observation.
///
/// Missing numeric inputs are stored as `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Calendar trading date (timezone-naive, no time of day).
    pub date: NaiveDate,
    /// Security identifier.
    pub ticker: String,
    /// Opening price.
    pub open: f64,
    /// Intraday high.
    pub high: f64,
    /// Intraday low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Split/dividend adjusted closing price.
    pub adj_close: f64,
    /// Shares traded.
    pub volume: f64,
}

impl PricePoint {
    /// Numeric fields paired with their column names, in [`PRICE_COLUMNS`] order.
    pub const fn numeric_fields(&self) -> [(&'static str, f64); 6] {
        [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("adj_close", self.adj_close),
            ("volume", self.volume),
        ]
    }
}

/// One ticker's rows, in chronological order.
#[derive(Debug, Clone)]
pub struct TickerPartition<'a> {
    /// Ticker shared by every row in the partition.
    pub ticker: &'a str,
    /// Rows sorted by date.
    pub points: Vec<&'a PricePoint>,
}

impl TickerPartition<'_> {
    /// Number of trading days in the partition.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the partition has no rows.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// An immutable daily price panel indexed by `(ticker, date)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricePanel {
    rows: Vec<PricePoint>,
}

impl PricePanel {
    /// Wrap already-normalized rows.
    pub const fn new(rows: Vec<PricePoint>) -> Self {
        Self { rows }
    }

    /// Rows in source order.
    pub fn rows(&self) -> &[PricePoint] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the panel has no rows.
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

    /// Earliest and latest date in the panel.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|r| r.date).min()?;
        let max = self.rows.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Split the panel into per-ticker chronological partitions.
    ///
    /// Rows are stably sorted by `(ticker, date)` and grouped, so partitions
    /// come out in ticker order and never share rows.
    pub fn partition(&self) -> Vec<TickerPartition<'_>> {
        let mut sorted: Vec<&PricePoint> = self.rows.iter().collect();
        sorted.sort_by(|a, b| a.ticker.cmp(&b.ticker).then(a.date.cmp(&b.date)));

        let mut partitions: Vec<TickerPartition<'_>> = Vec::new();
        for point in sorted {
            match partitions.last_mut() {
                Some(last) if last.ticker == point.ticker => last.points.push(point),
                _ => partitions.push(TickerPartition {
                    ticker: point.ticker.as_str(),
                    points: vec![point],
                }),
            }
        }
        partitions
    }
}

impl FromIterator<PricePoint> for PricePanel {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ticker: &str, day: u32, adj_close: f64) -> PricePoint {
        PricePoint {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            ticker: ticker.to_string(),
            open: adj_close,
            high: adj_close,
            low: adj_close,
            close: adj_close,
            adj_close,
            volume: 1_000.0,
        }
    }

    #[test]
    fn test_partition_groups_and_sorts() {
        let panel: PricePanel = vec![
            point("MSFT", 3, 3.0),
            point("AAPL", 2, 2.0),
            point("MSFT", 2, 1.0),
            point("AAPL", 3, 4.0),
        ]
        .into_iter()
        .collect();

        let parts = panel.partition();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].ticker, "AAPL");
        assert_eq!(parts[1].ticker, "MSFT");

        let msft: Vec<f64> = parts[1].points.iter().map(|p| p.adj_close).collect();
        assert_eq!(msft, vec![1.0, 3.0]);
    }

    #[test]
    fn test_ticker_count_and_range() {
        let panel: PricePanel = vec![point("A", 5, 1.0), point("B", 2, 1.0), point("A", 9, 1.0)]
            .into_iter()
            .collect();

        assert_eq!(panel.ticker_count(), 2);
        let (min, max) = panel.date_range().unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2024, 1, 9).unwrap());
    }

    #[test]
    fn test_empty_panel() {
        let panel = PricePanel::default();
        assert!(panel.is_empty());
        assert!(panel.date_range().is_none());
        assert!(panel.partition().is_empty());
    }
}
