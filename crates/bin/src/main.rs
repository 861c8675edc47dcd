//! Hobart CLI binary.
//!
//! Builds the point-in-time factor table from a price panel on disk.

mod config;

use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use hobart::{Pipeline, PipelineOutput, Stage};
use hobart_data::open_source;
use hobart_factors::available_factors;
use hobart_output::{FactorSummary, JsonSummarySink, open_sink};
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Hobart: point-in-time equity factor construction", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, validate and persist the factor table
    Build {
        /// Project root; default paths are resolved against it
        #[arg(long)]
        root: Option<PathBuf>,

        /// Config file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Input price panel (.parquet or .csv)
        #[arg(long)]
        prices: Option<PathBuf>,

        /// Output factor table (.parquet or .csv)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output summary (.json)
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Minimum distinct tickers after trimming
        #[arg(long)]
        min_tickers: Option<usize>,

        /// Evaluate tickers in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// List the factor columns
    Factors,

    /// Run every gate and print the summary without writing anything
    Summary {
        /// Input price panel (.parquet or .csv)
        #[arg(long)]
        prices: Option<PathBuf>,

        /// Config file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Minimum distinct tickers after trimming
        #[arg(long)]
        min_tickers: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Markdown,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hobart=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            root,
            config,
            prices,
            output,
            summary,
            min_tickers,
            parallel,
        } => {
            let mut config = Config::load(config.as_deref())?;
            if let Some(root) = root {
                config.root = root;
            }
            override_path(&mut config.prices_path, prices)?;
            override_path(&mut config.factors_path, output)?;
            override_path(&mut config.summary_path, summary)?;
            apply_pipeline_flags(&mut config, min_tickers, parallel);
            build(&config)?;
        }
        Commands::Factors => list_factors(),
        Commands::Summary {
            prices,
            config,
            min_tickers,
            format,
        } => {
            let mut config = Config::load(config.as_deref())?;
            override_path(&mut config.prices_path, prices)?;
            apply_pipeline_flags(&mut config, min_tickers, false);
            summarize_only(&config, format)?;
        }
    }

    Ok(())
}

/// Flag paths are taken relative to the working directory, not the root.
fn override_path(slot: &mut PathBuf, flag: Option<PathBuf>) -> std::io::Result<()> {
    if let Some(path) = flag {
        *slot = std::path::absolute(path)?;
    }
    Ok(())
}

const fn apply_pipeline_flags(config: &mut Config, min_tickers: Option<usize>, parallel: bool) {
    if let Some(n) = min_tickers {
        config.pipeline.validation.min_tickers = n;
    }
    if parallel {
        config.pipeline.parallel = true;
    }
}

fn spinner() -> Result<ProgressBar, Box<dyn Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn build(config: &Config) -> Result<(), Box<dyn Error>> {
    let prices = config.prices();
    let factors = config.factors();
    let summary = config.summary();

    let source = open_source(&prices)?;
    let factor_sink = open_sink(&factors)?;
    let summary_sink = JsonSummarySink::new(&summary);

    let pipeline = Pipeline::new(config.pipeline);
    let pb = spinner()?;
    let result = pipeline.run_and_persist_observed(
        source.as_ref(),
        factor_sink.as_ref(),
        &summary_sink,
        |stage| pb.set_message(stage.to_string()),
    );
    pb.finish_and_clear();
    let output = result?;
    info!(rows = output.factors.len(), tickers = output.summary.tickers_out, "build complete");

    print_written(&output, &factors, &summary);
    Ok(())
}

fn print_written(output: &PipelineOutput, factors: &Path, summary: &Path) {
    println!("{}", output.summary.to_ascii_table());
    println!("Factors: {}", factors.display());
    println!("Summary: {}", summary.display());
}

fn summarize_only(config: &Config, format: Format) -> Result<(), Box<dyn Error>> {
    let prices = config.prices();
    let source = open_source(&prices)?;

    let pb = spinner()?;
    let result = Pipeline::new(config.pipeline).run_observed(source.as_ref(), |stage: Stage| {
        pb.set_message(stage.to_string());
    });
    pb.finish_and_clear();

    print_summary(&result?.summary, format)
}

fn print_summary(summary: &FactorSummary, format: Format) -> Result<(), Box<dyn Error>> {
    match format {
        Format::Text => println!("{}", summary.to_ascii_table()),
        Format::Json => println!("{}", summary.to_json()?),
        Format::Markdown => println!("{}", summary.to_markdown()),
    }
    Ok(())
}

fn list_factors() {
    println!(
        "{:<18} {:<8} {:>8} {:>9}  Description",
        "Name", "Kind", "Lookback", "Lookahead"
    );
    println!("{}", "-".repeat(90));
    for factor in available_factors() {
        println!(
            "{:<18} {:<8} {:>8} {:>9}  {}",
            factor.name,
            factor.kind.to_string(),
            factor.lookback,
            factor.lookahead,
            factor.description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_flags_parse() {
        let cli = Cli::parse_from([
            "hobart",
            "build",
            "--root",
            "/project",
            "--min-tickers",
            "3",
            "--parallel",
        ]);
        match cli.command {
            Commands::Build {
                root,
                min_tickers,
                parallel,
                prices,
                ..
            } => {
                assert_eq!(root, Some(PathBuf::from("/project")));
                assert_eq!(min_tickers, Some(3));
                assert!(parallel);
                assert!(prices.is_none());
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_summary_format_parses() {
        let cli = Cli::parse_from(["hobart", "summary", "--format", "markdown"]);
        assert!(matches!(
            cli.command,
            Commands::Summary {
                format: Format::Markdown,
                ..
            }
        ));
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        override_path(&mut config.prices_path, Some(PathBuf::from("/abs/prices.csv"))).unwrap();
        apply_pipeline_flags(&mut config, Some(4), true);

        assert_eq!(config.prices(), PathBuf::from("/abs/prices.csv"));
        assert_eq!(config.pipeline.validation.min_tickers, 4);
        assert!(config.pipeline.parallel);
    }

    #[test]
    fn test_relative_flag_becomes_absolute() {
        let mut slot = PathBuf::new();
        override_path(&mut slot, Some(PathBuf::from("prices.parquet"))).unwrap();
        assert!(slot.is_absolute());
    }
}
