#![allow(clippy::format_push_string)]
#![allow(clippy::uninlined_format_args)]

use crate::report::AnalysisReport;
use crate::signal::{SignalResult, TradeSignal};

const RULE: &str = "═══════════════════════════════════════════════════════════════\n";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────\n";

pub struct SignalSummaryFormatter;

impl SignalSummaryFormatter {
    /// Renders one stage result as a human-readable block.
    #[must_use]
    pub fn format(result: &SignalResult) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(RULE);
        output.push_str("                 TRADING SIGNAL ANALYSIS                       \n");
        output.push_str(RULE);
        output.push_str(&format!(
            "Signal:                {} {}\n",
            marker(result.signal),
            result.signal
        ));
        output.push_str(&format!(
            "Confidence:            {:.1}%\n",
            result.confidence * 100.0
        ));
        output.push_str(&format!("Reason:                {}\n", result.reason));
        output.push('\n');

        output.push_str("Sentiment Breakdown\n");
        output.push_str(THIN_RULE);
        let count = |key: &str| result.detail_f64(key).unwrap_or(0.0);
        output.push_str(&format!(
            "Total Articles:        {}\n",
            count("total_articles")
        ));
        for label in ["positive", "negative", "neutral"] {
            output.push_str(&format!(
                "{:<23}{} ({:.1}%)\n",
                format!("{}:", capitalize(label)),
                count(&format!("{label}_count")),
                count(&format!("{label}_percentage"))
            ));
        }

        if let (Some(pos), Some(neg)) = (
            result.detail_f64("positive_to_negative_ratio"),
            result.detail_f64("negative_to_positive_ratio"),
        ) {
            output.push('\n');
            output.push_str("Ratios\n");
            output.push_str(THIN_RULE);
            output.push_str(&format!("Positive/Negative:     {:.2}\n", pos));
            output.push_str(&format!("Negative/Positive:     {:.2}\n", neg));
        }

        output.push('\n');
        output.push_str(&format!(
            "Generated:             {}\n",
            result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(RULE);

        output
    }

    /// Renders the final recommendation for a consensus report.
    #[must_use]
    pub fn format_report(report: &AnalysisReport) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(RULE);
        output.push_str("                FINAL INVESTMENT RECOMMENDATION                \n");
        output.push_str(RULE);
        output.push_str(&format!("Company:               {}\n", report.company));

        if let Some(error) = &report.error {
            output.push_str(&format!("Signal:                {}\n", report.signal));
            output.push_str(&format!("Error:                 {}\n", error));
            output.push_str(RULE);
            return output;
        }

        if let Some(total) = report.total_articles {
            output.push_str(&format!("Articles Analyzed:     {}\n", total));
        }
        output.push_str(&format!("Recommendation:        {}\n", report.signal));
        output.push_str(&format!(
            "Confidence Level:      {:.1}%\n",
            report.confidence * 100.0
        ));
        output.push_str(&format!("Risk Assessment:       {}\n", report.risk_level()));

        if let Some(details) = &report.signal_details {
            output.push('\n');
            output.push_str("Stage Signals\n");
            output.push_str(THIN_RULE);
            output.push_str(&format!(
                "Basic:                 {} ({:.1}%)\n",
                details.basic_signal,
                details.basic_confidence * 100.0
            ));
            output.push_str(&format!(
                "Weighted:              {} ({:.1}%)\n",
                details.weighted_signal,
                details.weighted_confidence * 100.0
            ));
            output.push_str(&format!(
                "Time-Weighted:         {} ({:.1}%)\n",
                details.time_weighted_signal,
                details.time_weighted_confidence * 100.0
            ));
        }

        if let Some(reasoning) = &report.reasoning {
            output.push('\n');
            output.push_str(&format!("Reasoning:             {}\n", reasoning));
        }

        output.push('\n');
        output.push_str("⚠️  Based on news sentiment only. Not a price forecast.\n");
        output.push_str(RULE);

        output
    }
}

fn marker(signal: TradeSignal) -> &'static str {
    match signal {
        TradeSignal::Buy => "▲",
        TradeSignal::Sell => "▼",
        TradeSignal::Hold => "■",
        TradeSignal::InsufficientData => "?",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportSignal, RiskLevel};

    #[test]
    fn format_includes_signal_and_breakdown() {
        let result = SignalResult::new(TradeSignal::Buy, 0.9, "Positive articles dominate")
            .with_detail("total_articles", 20usize)
            .with_detail("positive_count", 15usize)
            .with_detail("positive_percentage", 75.0)
            .with_detail("positive_to_negative_ratio", 5.0)
            .with_detail("negative_to_positive_ratio", 0.2);

        let text = SignalSummaryFormatter::format(&result);

        assert!(text.contains("BUY"));
        assert!(text.contains("90.0%"));
        assert!(text.contains("Positive:              15 (75.0%)"));
        assert!(text.contains("Positive/Negative:     5.00"));
    }

    #[test]
    fn format_omits_ratios_when_absent() {
        let result = SignalResult::insufficient(5, 2);
        let text = SignalSummaryFormatter::format(&result);
        assert!(text.contains("INSUFFICIENT_DATA"));
        assert!(!text.contains("Ratios"));
    }

    #[test]
    fn format_report_shows_error() {
        let report = AnalysisReport::failure("Acme", "boom");
        let text = SignalSummaryFormatter::format_report(&report);
        assert!(text.contains("ERROR"));
        assert!(text.contains("boom"));
        assert_eq!(report.signal, ReportSignal::Error);
        assert_eq!(report.risk_level(), RiskLevel::High);
    }
}
