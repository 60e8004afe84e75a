use clap::{Parser, Subcommand};

mod commands;

use commands::{AnalyzeArgs, ClassifyArgs};

#[derive(Parser)]
#[command(name = "sentiment-signal")]
#[command(about = "Turns news sentiment into BUY/SELL/HOLD recommendations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a table of pre-labelled sentiment observations
    Analyze(AnalyzeArgs),
    /// Label raw articles with the keyword classifier, then score them
    Classify(ClassifyArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON reports on stdout stay machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze(args) => {
            commands::run_analyze(args).await?;
        }
        Commands::Classify(args) => {
            commands::run_classify(args).await?;
        }
    }

    Ok(())
}
