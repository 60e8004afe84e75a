//! Classify command: label raw articles, then run the consensus engine.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use serde::Deserialize;
use sentiment_signal_core::{AnalysisReport, ScoringContext};
use sentiment_signal_engine::{
    Article, ArticleAnalyzer, ArticleField, KeywordClassifier, SignalEngine,
};
use std::path::Path;
use std::sync::Arc;

use super::{load_config, OutputFormat};

/// Arguments for the classify command.
#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    /// Articles file: a JSON array, or an object with an `articles` array
    #[arg(short, long)]
    pub input: String,

    /// Output format: text, json (default: text)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Company name shown in the report
    #[arg(long, default_value = "Unknown")]
    pub company: String,

    /// Article field whose labels drive the signal: title, description,
    /// combined (default: the configured columns)
    #[arg(long)]
    pub field: Option<String>,

    /// Config file layered over config/Config.toml
    #[arg(short, long, env = "SENTIMENT_CONFIG")]
    pub config: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArticleFile {
    List(Vec<Article>),
    Feed { articles: Vec<Article> },
}

/// Reads articles from a JSON file.
pub fn read_articles(path: impl AsRef<Path>) -> Result<Vec<Article>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read articles from {}", path.display()))?;
    let file: ArticleFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse articles in {}", path.display()))?;

    Ok(match file {
        ArticleFile::List(articles) | ArticleFile::Feed { articles } => articles,
    })
}

/// Runs the classify command, printing the consensus report to stdout.
pub async fn run_classify(args: ClassifyArgs) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;
    let config = load_config(args.config.as_deref())?;
    let engine = SignalEngine::new(config.signal)?;

    let columns = match args.field.as_deref() {
        Some(field) => field.parse::<ArticleField>()?.columns(),
        None => config.columns,
    };

    let articles = read_articles(&args.input)?;
    if articles.is_empty() {
        let message = format!("no articles found in {}", args.input);
        let report = AnalysisReport::failure(&args.company, &message);
        println!("{}", format.render_report(&report)?);
        return Err(anyhow!(message));
    }
    tracing::info!(articles = articles.len(), company = %args.company, "classifying");

    let analyzer = ArticleAnalyzer::new(Arc::new(KeywordClassifier::new()), config.classifier);
    let loaded = analyzer.analyze_with_columns(&articles, &columns).await;

    let report = engine.analyze_loaded(&args.company, loaded, &ScoringContext::now());
    println!("{}", format.render_report(&report)?);

    match report.error {
        Some(error) => Err(anyhow!(error)),
        None => Ok(()),
    }
}
