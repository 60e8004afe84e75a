//! Analyze command: score a pre-labelled sentiment table.

use anyhow::{anyhow, Result};
use clap::Args;
use sentiment_signal_core::{load_batch, AnalysisReport, ScoringContext};
use sentiment_signal_engine::{ScoringMethod, SignalEngine};

use super::{load_config, OutputFormat};

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Input table (.csv or .json) with one labelled observation per row
    #[arg(short, long)]
    pub input: String,

    /// Output format: text, json (default: text)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Company name shown in the report
    #[arg(long, default_value = "Unknown")]
    pub company: String,

    /// Config file layered over config/Config.toml
    #[arg(short, long, env = "SENTIMENT_CONFIG")]
    pub config: Option<String>,

    /// Scoring method: basic, weighted, time-weighted, consensus
    #[arg(long, default_value = "consensus")]
    pub method: String,
}

/// Runs the analyze command, printing the report to stdout.
///
/// An input that cannot be loaded still prints an error report before the
/// command fails, whichever method is selected.
pub async fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;
    let method: ScoringMethod = args.method.parse()?;
    let config = load_config(args.config.as_deref())?;
    let engine = SignalEngine::new(config.signal)?;
    let ctx = ScoringContext::now();

    tracing::info!(input = %args.input, %method, company = %args.company, "analyzing");

    let loaded = load_batch(&args.input, &config.columns);

    if method != ScoringMethod::Consensus {
        let batch = match loaded {
            Ok(batch) => batch,
            Err(e) => {
                let report = AnalysisReport::failure(&args.company, &e);
                println!("{}", format.render_report(&report)?);
                return Err(e.into());
            }
        };
        let result = engine.score_with(method, &batch, &ctx);
        println!("{}", format.render_result(&result)?);
        return Ok(());
    }

    let report = engine.analyze_loaded(&args.company, loaded, &ctx);
    println!("{}", format.render_report(&report)?);

    match report.error {
        Some(error) => Err(anyhow!(error)),
        None => Ok(()),
    }
}
