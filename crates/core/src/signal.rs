//! Signal types shared by every scoring stage.
//!
//! A scorer turns an [`ObservationBatch`] into a [`SignalResult`]: a discrete
//! recommendation, a capped confidence, an audit string, and a cumulative map
//! of diagnostic metrics.

use crate::observation::ObservationBatch;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Hard cap on any confidence produced by an upward adjustment.
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Discrete trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSignal {
    Buy,
    Sell,
    Hold,
    /// Fewer observations than `min_articles`; terminal for every stage
    InsufficientData,
}

impl TradeSignal {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
            Self::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

impl fmt::Display for TradeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic value. Serializes as a bare JSON integer, float, or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailValue {
    Count(u64),
    Number(f64),
    Text(String),
}

impl DetailValue {
    /// Numeric view of the value; `None` for text.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Count(n) => Some(*n as f64),
            Self::Number(x) => Some(*x),
            Self::Text(_) => None,
        }
    }
}

impl From<usize> for DetailValue {
    fn from(value: usize) -> Self {
        Self::Count(value as u64)
    }
}

impl From<i64> for DetailValue {
    fn from(value: i64) -> Self {
        Self::Count(value.max(0) as u64)
    }
}

impl From<f64> for DetailValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for DetailValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DetailValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Output of any scoring stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalResult {
    pub signal: TradeSignal,
    /// Rounded to three decimals
    pub confidence: f64,
    /// Audit explanation; never used for branching
    pub reason: String,
    /// Diagnostics; later stages extend but never remove keys
    #[serde(default)]
    pub details: BTreeMap<String, DetailValue>,
    /// Generation time, informational only
    pub timestamp: DateTime<Utc>,
}

impl SignalResult {
    /// Creates a result, rounding the confidence to three decimals.
    #[must_use]
    pub fn new(signal: TradeSignal, confidence: f64, reason: impl Into<String>) -> Self {
        Self {
            signal,
            confidence: round_confidence(confidence),
            reason: reason.into(),
            details: BTreeMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// The terminal short-circuit for undersized batches.
    #[must_use]
    pub fn insufficient(required: usize, actual: usize) -> Self {
        Self::new(
            TradeSignal::InsufficientData,
            0.0,
            format!("Insufficient articles. Need at least {required}, got {actual}"),
        )
    }

    /// Adds a diagnostic metric.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<DetailValue>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Carries every detail of `base` into this result.
    ///
    /// Keys already present on `self` are kept.
    #[must_use]
    pub fn extending(mut self, base: &SignalResult) -> Self {
        for (key, value) in &base.details {
            self.details
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    /// Numeric detail lookup.
    #[must_use]
    pub fn detail_f64(&self, key: &str) -> Option<f64> {
        self.details.get(key).and_then(DetailValue::as_f64)
    }

    /// Signal and confidence equality, ignoring the generation timestamp.
    #[must_use]
    pub fn same_outcome(&self, other: &SignalResult) -> bool {
        self.signal == other.signal && (self.confidence - other.confidence).abs() < 1e-12
    }
}

/// Rounds a confidence to three decimals.
#[must_use]
pub fn round_confidence(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Raises a confidence by `bump`, never exceeding [`MAX_CONFIDENCE`].
#[must_use]
pub fn bump_confidence(base: f64, bump: f64) -> f64 {
    MAX_CONFIDENCE.min(base + bump)
}

/// Evaluation context shared by the stages of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringContext {
    /// Reference time for recency, naive UTC
    pub now: NaiveDateTime,
}

impl ScoringContext {
    /// Context anchored at the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            now: Utc::now().naive_utc(),
        }
    }

    /// Context anchored at a fixed time.
    #[must_use]
    pub const fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }
}

impl Default for ScoringContext {
    fn default() -> Self {
        Self::now()
    }
}

/// A deterministic scoring stage.
///
/// Implementations are pure: the same batch and context always yield the
/// same signal and confidence.
pub trait SentimentScorer: Send + Sync {
    /// Scores the batch.
    fn score(&self, batch: &ObservationBatch, ctx: &ScoringContext) -> SignalResult;

    /// Returns the name of this stage.
    fn name(&self) -> &str;
}
