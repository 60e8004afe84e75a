//! CLI commands.

pub mod analyze;
pub mod classify;
mod output;

pub use analyze::{run_analyze, AnalyzeArgs};
pub use classify::{run_classify, ClassifyArgs};
use output::OutputFormat;

use anyhow::Result;
use sentiment_signal_core::{AppConfig, ConfigLoader};

/// Loads configuration from an explicit file, or from the default locations.
fn load_config(path: Option<&str>) -> Result<AppConfig> {
    match path {
        Some(path) => ConfigLoader::load_from(path),
        None => ConfigLoader::load(),
    }
}
