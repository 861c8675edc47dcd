//! Run summary for a factor build.
//!
//! The summary is a pure function of the input panel and the output factor
//! table. Whether and where it is persisted is the caller's decision.

use chrono::NaiveDate;
use hobart_data::PricePanel;
use hobart_factors::{FactorColumn, FactorFrame};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Columns of the output table, in output order.
pub const OUTPUT_COLUMNS: [&str; 10] = [
    "date",
    "ticker",
    "ret_1d",
    "ret_fwd_5d",
    "mom_20d",
    "mom_60d",
    "vol_20d",
    "zscore_20d_price",
    "adv_20d",
    "dollar_vol_20d",
];

/// Counts, date range and missingness of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorSummary {
    /// Rows in the input price panel.
    pub rows_in: usize,

    /// Rows in the factor table.
    pub rows_out: usize,

    /// Distinct tickers in the input panel.
    pub tickers_in: usize,

    /// Distinct tickers in the factor table.
    pub tickers_out: usize,

    /// Earliest output date, `null` for an empty table.
    pub min_date: Option<NaiveDate>,

    /// Latest output date, `null` for an empty table.
    pub max_date: Option<NaiveDate>,

    /// Percentage of missing values per output column, rounded to 4 places.
    pub missingness_pct: BTreeMap<String, f64>,
}

/// Summarize a run from its input panel and output factor table.
pub fn summarize(panel: &PricePanel, frame: &FactorFrame) -> FactorSummary {
    let (min_date, max_date) = frame.date_range().unzip();

    let mut missingness_pct = BTreeMap::new();
    // keys are never missing in a built frame
    missingness_pct.insert("date".to_string(), 0.0);
    missingness_pct.insert("ticker".to_string(), 0.0);
    for column in FactorColumn::ALL {
        let missing = frame.column(column).iter().filter(|v| v.is_nan()).count();
        missingness_pct.insert(column.name().to_string(), percentage(missing, frame.len()));
    }

    FactorSummary {
        rows_in: panel.len(),
        rows_out: frame.len(),
        tickers_in: panel.ticker_count(),
        tickers_out: frame.ticker_count(),
        min_date,
        max_date,
        missingness_pct,
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round4(count as f64 / total as f64 * 100.0)
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.to_string())
}

impl FactorSummary {
    /// Missingness of `column`, if it is an output column.
    pub fn missingness(&self, column: &str) -> Option<f64> {
        self.missingness_pct.get(column).copied()
    }

    /// Rows dropped by warm-up and tail trimming.
    pub const fn rows_dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str("\nFactor Build Summary\n");
        output.push_str(&"=".repeat(48));
        output.push('\n');
        output.push_str(&format!("  {:<22} {:>12} {:>10}\n", "", "Input", "Output"));
        output.push_str(&format!(
            "  {:<22} {:>12} {:>10}\n",
            "Rows", self.rows_in, self.rows_out
        ));
        output.push_str(&format!(
            "  {:<22} {:>12} {:>10}\n",
            "Tickers", self.tickers_in, self.tickers_out
        ));
        output.push_str(&format!(
            "  {:<22} {} to {}\n",
            "Date range",
            fmt_date(self.min_date),
            fmt_date(self.max_date)
        ));

        output.push_str("\nMissingness:\n");
        output.push_str(&"-".repeat(48));
        output.push('\n');
        for column in OUTPUT_COLUMNS {
            if let Some(pct) = self.missingness(column) {
                output.push_str(&format!("  {column:<22} {pct:>11.4}%\n"));
            }
        }
        output.push_str(&"=".repeat(48));
        output.push('\n');

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str("# Factor Build Summary\n\n");
        output.push_str("| | Input | Output |\n");
        output.push_str("|---|---:|---:|\n");
        output.push_str(&format!("| Rows | {} | {} |\n", self.rows_in, self.rows_out));
        output.push_str(&format!(
            "| Tickers | {} | {} |\n\n",
            self.tickers_in, self.tickers_out
        ));
        output.push_str(&format!(
            "**Date range:** {} to {}\n\n",
            fmt_date(self.min_date),
            fmt_date(self.max_date)
        ));

        output.push_str("## Missingness\n\n");
        output.push_str("| Column | Missing % |\n");
        output.push_str("|--------|----------:|\n");
        for column in OUTPUT_COLUMNS {
            if let Some(pct) = self.missingness(column) {
                output.push_str(&format!("| {column} | {pct:.4} |\n"));
            }
        }

        output
    }
}

impl fmt::Display for FactorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} rows, {} -> {} tickers, {} to {}",
            self.rows_in,
            self.rows_out,
            self.tickers_in,
            self.tickers_out,
            fmt_date(self.min_date),
            fmt_date(self.max_date)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hobart_data::PricePoint;
    use hobart_factors::{FactorRow, Features, Label};
    use rstest::rstest;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn point(ticker: &str, day: u32) -> PricePoint {
        PricePoint {
            date: date(day),
            ticker: ticker.to_string(),
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            adj_close: 1.0,
            volume: 1.0,
        }
    }

    fn row(ticker: &str, day: u32) -> FactorRow {
        FactorRow {
            date: date(day),
            ticker: ticker.to_string(),
            features: Features {
                ret_1d: 0.0,
                mom_20d: 0.0,
                mom_60d: 0.0,
                vol_20d: 0.1,
                zscore_20d_price: 0.0,
                adv_20d: 1.0,
                dollar_vol_20d: 1.0,
            },
            label: Label { ret_fwd_5d: 0.0 },
        }
    }

    #[test]
    fn test_summarize_counts() {
        let panel: PricePanel = [point("A", 1), point("A", 4), point("B", 1), point("C", 2)]
            .into_iter()
            .collect();
        let frame: FactorFrame = [row("A", 4), row("B", 1)].into_iter().collect();

        let summary = summarize(&panel, &frame);
        assert_eq!(summary.rows_in, 4);
        assert_eq!(summary.rows_out, 2);
        assert_eq!(summary.tickers_in, 3);
        assert_eq!(summary.tickers_out, 2);
        assert_eq!(summary.min_date, Some(date(1)));
        assert_eq!(summary.max_date, Some(date(4)));
        assert_eq!(summary.rows_dropped(), 2);
        assert_eq!(summary.missingness_pct.len(), OUTPUT_COLUMNS.len());
        assert!(summary.missingness_pct.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_empty_output() {
        let panel: PricePanel = [point("A", 1)].into_iter().collect();
        let summary = summarize(&panel, &FactorFrame::default());

        assert_eq!(summary.rows_out, 0);
        assert_eq!(summary.min_date, None);
        assert_eq!(summary.max_date, None);
        assert_eq!(summary.missingness("vol_20d"), Some(0.0));

        let json = summary.to_json().unwrap();
        assert!(json.contains("\"min_date\": null"));
    }

    #[test]
    fn test_missingness_counts_nan() {
        let mut rows = vec![row("A", 1), row("A", 2), row("A", 3)];
        rows[1].features.adv_20d = f64::NAN;
        let frame = FactorFrame::new(rows);

        let summary = summarize(&PricePanel::default(), &frame);
        assert_eq!(summary.missingness("adv_20d"), Some(33.3333));
        assert_eq!(summary.missingness("ret_1d"), Some(0.0));
    }

    #[rstest]
    #[case(1, 3, 33.3333)]
    #[case(2, 3, 66.6667)]
    #[case(1, 8, 12.5)]
    #[case(0, 0, 0.0)]
    fn test_percentage_rounding(#[case] count: usize, #[case] total: usize, #[case] expected: f64) {
        assert_eq!(percentage(count, total), expected);
    }

    #[test]
    fn test_json_field_names() {
        let frame: FactorFrame = [row("A", 5)].into_iter().collect();
        let summary = summarize(&PricePanel::default(), &frame);
        let value: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();

        for key in [
            "rows_in",
            "rows_out",
            "tickers_in",
            "tickers_out",
            "min_date",
            "max_date",
            "missingness_pct",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["max_date"], "2024-03-05");
    }

    #[test]
    fn test_renderings_list_every_column() {
        let frame: FactorFrame = [row("A", 5)].into_iter().collect();
        let summary = summarize(&PricePanel::default(), &frame);

        let ascii = summary.to_ascii_table();
        let markdown = summary.to_markdown();
        for column in OUTPUT_COLUMNS {
            assert!(ascii.contains(column));
            assert!(markdown.contains(&format!("| {column} |")));
        }
        assert!(summary.to_string().contains("2024-03-05 to 2024-03-05"));
    }
}
