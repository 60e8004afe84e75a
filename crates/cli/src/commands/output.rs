use anyhow::{anyhow, Result};
use sentiment_signal_core::{AnalysisReport, SignalResult, SignalSummaryFormatter};

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parses an output format from string.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!(
                "Unknown format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }

    pub fn render_report(self, report: &AnalysisReport) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(SignalSummaryFormatter::format_report(report)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        }
    }

    pub fn render_result(self, result: &SignalResult) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(SignalSummaryFormatter::format(result)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        }
    }
}
