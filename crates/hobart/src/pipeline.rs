//! Gate sequencing: load, validate, build, validate, summarize, persist.
//!
//! Each stage consumes the previous stage's immutable output. The first
//! failing gate aborts the run; persistence happens only after all gates pass.

use crate::error::Result;
use derive_more::Display;
use hobart_data::{PricePanel, PriceSource, load_prices, validate_prices};
use hobart_factors::{FactorEngine, FactorFrame, FactorValidationConfig, validate_factors};
use hobart_output::{FactorSink, FactorSummary, SummarySink, summarize};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Pipeline stages, in execution order.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the raw table from the source
    #[display("reading prices")]
    Read,
    /// Normalizing dates and column types
    #[display("loading panel")]
    Load,
    /// Key uniqueness, ordering and sign checks
    #[display("validating panel")]
    ValidatePanel,
    /// Per-ticker factor computation
    #[display("building factors")]
    Build,
    /// Volatility, finiteness and coverage checks
    #[display("validating factors")]
    ValidateFactors,
    /// Counts, date range and missingness
    #[display("summarizing")]
    Summarize,
    /// Writing the factor table
    #[display("writing factors")]
    WriteFactors,
    /// Writing the summary
    #[display("writing summary")]
    WriteSummary,
}

/// Pipeline settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Factor validation thresholds.
    pub validation: FactorValidationConfig,
    /// Evaluate tickers in parallel.
    pub parallel: bool,
}

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The validated input panel.
    pub panel: PricePanel,
    /// The validated factor table.
    pub factors: FactorFrame,
    /// The run summary.
    pub summary: FactorSummary,
}

/// The factor pipeline.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
    engine: FactorEngine,
}

impl Pipeline {
    /// Pipeline with the given settings.
    pub const fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            engine: FactorEngine::new().with_parallelism(config.parallel),
        }
    }

    /// Active settings.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every gate against `source` without persisting anything.
    pub fn run(&self, source: &dyn PriceSource) -> Result<PipelineOutput> {
        self.run_observed(source, |_| {})
    }

    /// [`Pipeline::run`], calling `observe` as each stage starts.
    pub fn run_observed<F>(&self, source: &dyn PriceSource, mut observe: F) -> Result<PipelineOutput>
    where
        F: FnMut(Stage),
    {
        observe(Stage::Read);
        info!(source = %source.name(), "loading prices");
        let raw = source.read()?;
        self.run_gates(&raw, &mut observe)
    }

    /// Run every gate against an in-memory raw table.
    pub fn run_frame(&self, raw: &DataFrame) -> Result<PipelineOutput> {
        self.run_gates(raw, &mut |_: Stage| {})
    }

    /// Run every gate, then write the factor table followed by the summary.
    ///
    /// Nothing is written if any gate fails. If the factor write fails the
    /// summary is not written.
    pub fn run_and_persist(
        &self,
        source: &dyn PriceSource,
        factor_sink: &dyn FactorSink,
        summary_sink: &dyn SummarySink,
    ) -> Result<PipelineOutput> {
        self.run_and_persist_observed(source, factor_sink, summary_sink, |_| {})
    }

    /// [`Pipeline::run_and_persist`], calling `observe` as each stage starts.
    pub fn run_and_persist_observed<F>(
        &self,
        source: &dyn PriceSource,
        factor_sink: &dyn FactorSink,
        summary_sink: &dyn SummarySink,
        mut observe: F,
    ) -> Result<PipelineOutput>
    where
        F: FnMut(Stage),
    {
        let output = self.run_observed(source, &mut observe)?;

        observe(Stage::WriteFactors);
        info!(sink = %factor_sink.name(), "writing factors");
        factor_sink.write(&output.factors)?;

        observe(Stage::WriteSummary);
        info!(sink = %summary_sink.name(), "writing summary");
        summary_sink.write(&output.summary)?;

        Ok(output)
    }

    fn run_gates(&self, raw: &DataFrame, observe: &mut dyn FnMut(Stage)) -> Result<PipelineOutput> {
        observe(Stage::Load);
        let panel = load_prices(raw)?;

        observe(Stage::ValidatePanel);
        validate_prices(&panel)?;

        observe(Stage::Build);
        let factors = self.engine.build(&panel)?;

        observe(Stage::ValidateFactors);
        validate_factors(&factors, &self.config.validation)?;

        observe(Stage::Summarize);
        let summary = summarize(&panel, &factors);
        info!(%summary, "pipeline gates passed");

        Ok(PipelineOutput {
            panel,
            factors,
            summary,
        })
    }
}
