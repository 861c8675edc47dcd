//! Factor engine: per-ticker computation with warm-up and tail trimming.

use crate::{
    error::Result,
    frame::{FactorFrame, FactorRow, Features, Label},
    label::ForwardReturn,
    liquidity::{AverageDailyVolume, DollarVolume},
    momentum::{DailyReturn, PriceMomentum},
    traits::{Factor, TickerHistory},
    volatility::{PriceZScore, ReturnVolatility},
};
use hobart_data::{PricePanel, TickerPartition};
use polars::prelude::Expr;
use rayon::prelude::*;
use tracing::{debug, info};

/// Computes the eight factor columns over a price panel.
///
/// Each ticker is processed in isolation. A row survives only if every one of
/// the eight values is defined, so the output is dense by construction.
#[derive(Debug, Clone)]
pub struct FactorEngine {
    ret_1d: DailyReturn,
    ret_fwd_5d: ForwardReturn,
    mom_20d: PriceMomentum,
    mom_60d: PriceMomentum,
    vol_20d: ReturnVolatility,
    zscore_20d_price: PriceZScore,
    adv_20d: AverageDailyVolume,
    dollar_vol_20d: DollarVolume,
    parallel: bool,
}

impl Default for FactorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FactorEngine {
    /// Sequential engine with the standard windows.
    pub const fn new() -> Self {
        Self {
            ret_1d: DailyReturn,
            ret_fwd_5d: ForwardReturn::new(5),
            mom_20d: PriceMomentum::twenty_day(),
            mom_60d: PriceMomentum::sixty_day(),
            vol_20d: ReturnVolatility::new(20),
            zscore_20d_price: PriceZScore::new(20),
            adv_20d: AverageDailyVolume::new(20),
            dollar_vol_20d: DollarVolume::new(20),
            parallel: false,
        }
    }

    /// Evaluate tickers on the rayon pool. Output is identical either way.
    pub const fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether tickers are evaluated in parallel.
    pub const fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// The eight factors in output column order.
    pub fn factors(&self) -> [&dyn Factor; 8] {
        [
            &self.ret_1d,
            &self.ret_fwd_5d,
            &self.mom_20d,
            &self.mom_60d,
            &self.vol_20d,
            &self.zscore_20d_price,
            &self.adv_20d,
            &self.dollar_vol_20d,
        ]
    }

    /// Leading rows of every ticker that can never survive.
    pub fn warm_up(&self) -> usize {
        self.factors().iter().map(|f| f.lookback()).max().unwrap_or(0)
    }

    /// Trailing rows of every ticker that can never survive.
    pub fn tail(&self) -> usize {
        self.factors().iter().map(|f| f.lookahead()).max().unwrap_or(0)
    }

    /// Rows a ticker with `n` trading days contributes to the output,
    /// assuming no missing inputs.
    pub fn surviving_rows(&self, n: usize) -> usize {
        n.saturating_sub(self.warm_up() + self.tail())
    }

    /// Build the factor table for a validated panel.
    ///
    /// Output is sorted by `(ticker, date)`.
    pub fn build(&self, panel: &PricePanel) -> Result<FactorFrame> {
        let partitions = panel.partition();
        let exprs: Vec<Expr> = self.factors().iter().map(|f| f.expr()).collect();

        let per_ticker: Vec<Vec<FactorRow>> = if self.parallel {
            partitions.par_iter().map(|p| Self::build_ticker(p, &exprs)).collect::<Result<_>>()?
        } else {
            partitions.iter().map(|p| Self::build_ticker(p, &exprs)).collect::<Result<_>>()?
        };

        let mut rows: Vec<FactorRow> = per_ticker.into_iter().flatten().collect();
        rows.sort_by(|a, b| a.ticker.cmp(&b.ticker).then(a.date.cmp(&b.date)));

        let frame = FactorFrame::new(rows);
        info!(
            rows_in = panel.len(),
            rows_out = frame.len(),
            tickers_in = partitions.len(),
            tickers_out = frame.ticker_count(),
            parallel = self.parallel,
            "built factor table"
        );
        Ok(frame)
    }

    fn build_ticker(
        partition: &TickerPartition<'_>,
        exprs: &[Expr],
    ) -> Result<Vec<FactorRow>> {
        let history = TickerHistory::from(partition);
        let columns = history.evaluate(exprs)?;
        let [ret_1d, ret_fwd_5d, mom_20d, mom_60d, vol_20d, zscore, adv_20d, dollar_vol_20d] =
            columns.as_slice()
        else {
            return Ok(Vec::new());
        };

        let rows: Vec<FactorRow> = (0..history.len())
            .filter_map(|t| {
                Some(FactorRow {
                    date: history.dates[t],
                    ticker: history.ticker.clone(),
                    features: Features {
                        ret_1d: ret_1d[t]?,
                        mom_20d: mom_20d[t]?,
                        mom_60d: mom_60d[t]?,
                        vol_20d: vol_20d[t]?,
                        zscore_20d_price: zscore[t]?,
                        adv_20d: adv_20d[t]?,
                        dollar_vol_20d: dollar_vol_20d[t]?,
                    },
                    label: Label { ret_fwd_5d: ret_fwd_5d[t]? },
                })
            })
            .collect();

        if rows.is_empty() {
            debug!(ticker = %history.ticker, days = history.len(), "ticker dropped: no complete rows");
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use hobart_data::PricePoint;

    fn ticker(name: &str, days: usize) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        (0..days)
            .map(|i| {
                let px = 50.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.1;
                PricePoint {
                    date: start + Days::new(i as u64),
                    ticker: name.to_string(),
                    open: px,
                    high: px,
                    low: px,
                    close: px,
                    adj_close: px,
                    volume: 1_000.0 + i as f64,
                }
            })
            .collect()
    }

    #[test]
    fn test_warm_up_and_tail() {
        let engine = FactorEngine::new();
        assert_eq!(engine.warm_up(), 60);
        assert_eq!(engine.tail(), 5);
        assert_eq!(engine.surviving_rows(66), 1);
        assert_eq!(engine.surviving_rows(65), 0);
        assert_eq!(engine.surviving_rows(5), 0);
    }

    #[test]
    fn test_first_and_last_surviving_rows() {
        let points = ticker("X", 70);
        let panel: PricePanel = points.clone().into_iter().collect();
        let frame = FactorEngine::new().build(&panel).unwrap();

        assert_eq!(frame.len(), 5);
        assert_eq!(frame.rows()[0].date, points[60].date);
        assert_eq!(frame.rows()[4].date, points[64].date);
    }

    #[test]
    fn test_output_sorted_by_ticker_then_date() {
        let mut points = ticker("B", 80);
        points.extend(ticker("A", 80));
        let panel: PricePanel = points.into_iter().collect();

        let frame = FactorEngine::new().build(&panel).unwrap();
        let keys: Vec<_> = frame.rows().iter().map(|r| (r.ticker.clone(), r.date)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(frame.ticker_count(), 2);
    }

    #[test]
    fn test_missing_price_removes_dependent_rows() {
        let mut points = ticker("X", 90);
        points[70].adj_close = f64::NAN;
        let panel: PricePanel = points.into_iter().collect();

        let frame = FactorEngine::new().build(&panel).unwrap();
        // 25 rows without the gap; the NaN poisons every window touching row 70
        assert!(frame.len() < 25);
        assert!(frame.rows().iter().all(|r| !r.features.ret_1d.is_nan()));
    }
}
