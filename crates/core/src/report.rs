//! Caller-facing analysis report.
//!
//! This is the JSON shape handed to front ends. Counts serialize as plain
//! integers, confidences as plain floats, and absent or non-finite values as
//! `null`.

use crate::observation::LabelCounts;
use crate::signal::TradeSignal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recommendation as surfaced to callers, including the error outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportSignal {
    Buy,
    Sell,
    Hold,
    InsufficientData,
    Error,
}

impl From<TradeSignal> for ReportSignal {
    fn from(signal: TradeSignal) -> Self {
        match signal {
            TradeSignal::Buy => Self::Buy,
            TradeSignal::Sell => Self::Sell,
            TradeSignal::Hold => Self::Hold,
            TradeSignal::InsufficientData => Self::InsufficientData,
        }
    }
}

impl fmt::Display for ReportSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
            Self::InsufficientData => "INSUFFICIENT_DATA",
            Self::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// Risk bucket derived from the consensus confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.8 {
            Self::Low
        } else if confidence > 0.6 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "LOW RISK",
            Self::Medium => "MEDIUM RISK",
            Self::High => "HIGH RISK",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub positive_percentage: Option<f64>,
    pub negative_percentage: Option<f64>,
    pub neutral_percentage: Option<f64>,
}

impl From<LabelCounts> for SentimentBreakdown {
    fn from(counts: LabelCounts) -> Self {
        Self {
            positive_count: counts.positive,
            negative_count: counts.negative,
            neutral_count: counts.neutral,
            positive_percentage: counts.percentage(counts.positive),
            negative_percentage: counts.percentage(counts.negative),
            neutral_percentage: counts.percentage(counts.neutral),
        }
    }
}

/// Per-stage signals and confidences behind the consensus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDetails {
    pub basic_signal: TradeSignal,
    pub weighted_signal: TradeSignal,
    pub time_weighted_signal: TradeSignal,
    pub basic_confidence: f64,
    pub weighted_confidence: f64,
    pub time_weighted_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub success: bool,
    pub signal: ReportSignal,
    pub confidence: f64,
    pub company: String,
    pub analysis_timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_articles: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_breakdown: Option<SentimentBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_details: Option<SignalDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisReport {
    /// Error outcome: signal ERROR, confidence 0.0, and the message.
    #[must_use]
    pub fn failure(company: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            success: false,
            signal: ReportSignal::Error,
            confidence: 0.0,
            company: company.into(),
            analysis_timestamp: Utc::now(),
            total_articles: None,
            sentiment_breakdown: None,
            signal_details: None,
            reasoning: None,
            error: Some(error.to_string()),
        }
    }

    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_confidence(self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_follow_confidence_bands() {
        assert_eq!(RiskLevel::from_confidence(0.85), RiskLevel::Low);
        assert_eq!(RiskLevel::from_confidence(0.8), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_confidence(0.61), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_confidence(0.6), RiskLevel::High);
    }

    #[test]
    fn failure_report_serializes_error() {
        let report = AnalysisReport::failure("Acme", "Column 'x' not found in input data");
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["signal"], "ERROR");
        assert_eq!(json["confidence"], serde_json::json!(0.0));
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("not found"));
        assert!(json.get("signal_details").is_none());
    }

    #[test]
    fn empty_breakdown_percentages_are_null() {
        let breakdown = SentimentBreakdown::from(LabelCounts::default());
        let json = serde_json::to_value(&breakdown).unwrap();
        assert!(json["positive_percentage"].is_null());
        assert_eq!(json["positive_count"], serde_json::json!(0));
    }

    #[test]
    fn report_signal_from_trade_signal() {
        assert_eq!(ReportSignal::from(TradeSignal::Buy), ReportSignal::Buy);
        assert_eq!(
            ReportSignal::from(TradeSignal::InsufficientData).to_string(),
            "INSUFFICIENT_DATA"
        );
    }
}
