//! Sentiment observations and batch ingestion.
//!
//! Every timestamp is normalized to naive UTC exactly once, when the batch is
//! built, so the scoring stages can do plain arithmetic on it.

use crate::config::ColumnConfig;
use crate::error::SignalError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Sentiment label assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            other => Err(other.to_string()),
        }
    }
}

/// One analyzed text unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentObservation {
    pub label: SentimentLabel,
    /// Classifier confidence; `None` when not supplied
    pub confidence: Option<f64>,
    /// Publication time in naive UTC; `None` when missing or unparseable
    pub published_at: Option<NaiveDateTime>,
}

impl SentimentObservation {
    #[must_use]
    pub fn new(label: SentimentLabel, confidence: f64, published_at: NaiveDateTime) -> Self {
        Self {
            label,
            confidence: Some(confidence),
            published_at: Some(published_at),
        }
    }

    /// An observation carrying only a label.
    #[must_use]
    pub const fn label_only(label: SentimentLabel) -> Self {
        Self {
            label,
            confidence: None,
            published_at: None,
        }
    }
}

/// Raw label counts of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl LabelCounts {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Share of `count` in the total, in percent; `None` for an empty batch.
    #[must_use]
    pub fn percentage(&self, count: usize) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| count as f64 / total as f64 * 100.0)
    }
}

/// Per-label sums of an arbitrary weight.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LabelWeights {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl LabelWeights {
    pub fn add(&mut self, label: SentimentLabel, weight: f64) {
        match label {
            SentimentLabel::Positive => self.positive += weight,
            SentimentLabel::Negative => self.negative += weight,
            SentimentLabel::Neutral => self.neutral += weight,
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }

    /// Percentage shares `(positive, negative, neutral)`; `None` when the total is zero.
    #[must_use]
    pub fn percentages(&self) -> Option<(f64, f64, f64)> {
        let total = self.total();
        if total == 0.0 || !total.is_finite() {
            return None;
        }
        Some((
            self.positive / total * 100.0,
            self.negative / total * 100.0,
            self.neutral / total * 100.0,
        ))
    }
}

/// Loosely typed input table: the columns present plus one object per row.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub columns: BTreeSet<String>,
    pub records: Vec<Map<String, Value>>,
}

impl RecordSet {
    /// Builds a record set whose columns are the union of all row keys.
    #[must_use]
    pub fn from_records(records: Vec<Map<String, Value>>) -> Self {
        let columns = records
            .iter()
            .flat_map(|r| r.keys().cloned())
            .collect();
        Self { columns, records }
    }
}

/// Immutable batch handed to the scoring stages.
#[derive(Debug, Clone)]
pub struct ObservationBatch {
    observations: Vec<SentimentObservation>,
    label_column: String,
    confidence_column: Option<String>,
    date_column: Option<String>,
}

impl ObservationBatch {
    /// Wraps observations using the default column names.
    #[must_use]
    pub fn new(observations: Vec<SentimentObservation>) -> Self {
        let columns = ColumnConfig::default();
        Self {
            observations,
            label_column: columns.label_column,
            confidence_column: Some(columns.confidence_column),
            date_column: Some(columns.date_column),
        }
    }

    /// Normalizes a record set into a batch.
    ///
    /// # Errors
    ///
    /// An input without rows is an empty batch, never an error. Otherwise
    /// fails fast when the label column is absent, a row has no label, or a
    /// label is not one of positive/negative/neutral. Missing confidence or
    /// date columns are not errors; the dependent stages fall back instead.
    pub fn from_records(set: &RecordSet, columns: &ColumnConfig) -> Result<Self, SignalError> {
        // A JSON `[]` carries no column names; treat it like a header-only CSV.
        if set.records.is_empty() {
            return Ok(Self {
                observations: Vec::new(),
                label_column: columns.label_column.clone(),
                confidence_column: None,
                date_column: None,
            });
        }

        if !set.columns.contains(&columns.label_column) {
            return Err(SignalError::MissingColumn(columns.label_column.clone()));
        }

        let has_confidence = set.columns.contains(&columns.confidence_column);
        let has_date = set.columns.contains(&columns.date_column);

        let mut observations = Vec::with_capacity(set.records.len());
        for (row, record) in set.records.iter().enumerate() {
            let label = match record.get(&columns.label_column) {
                Some(Value::String(s)) if !s.trim().is_empty() => s
                    .parse::<SentimentLabel>()
                    .map_err(|value| SignalError::InvalidLabel { value, row })?,
                Some(Value::Null) | None => {
                    return Err(SignalError::MissingValue {
                        column: columns.label_column.clone(),
                        row,
                    })
                }
                Some(Value::String(_)) => {
                    return Err(SignalError::MissingValue {
                        column: columns.label_column.clone(),
                        row,
                    })
                }
                Some(other) => {
                    return Err(SignalError::InvalidLabel {
                        value: other.to_string(),
                        row,
                    })
                }
            };

            let confidence = if has_confidence {
                record.get(&columns.confidence_column).and_then(value_as_f64)
            } else {
                None
            };

            let published_at = if has_date {
                record
                    .get(&columns.date_column)
                    .and_then(Value::as_str)
                    .and_then(parse_timestamp)
            } else {
                None
            };

            observations.push(SentimentObservation {
                label,
                confidence,
                published_at,
            });
        }

        tracing::debug!(
            rows = observations.len(),
            has_confidence,
            has_date,
            "normalized observation batch"
        );

        Ok(Self {
            observations,
            label_column: columns.label_column.clone(),
            confidence_column: has_confidence.then(|| columns.confidence_column.clone()),
            date_column: has_date.then(|| columns.date_column.clone()),
        })
    }

    /// Marks the confidence column as absent.
    #[must_use]
    pub fn without_confidence_column(mut self) -> Self {
        self.confidence_column = None;
        self
    }

    /// Marks the date column as absent.
    #[must_use]
    pub fn without_date_column(mut self) -> Self {
        self.date_column = None;
        self
    }

    #[must_use]
    pub fn observations(&self) -> &[SentimentObservation] {
        &self.observations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    #[must_use]
    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    /// Name of the confidence column, if confidences are available at all.
    ///
    /// `None` when the column is absent or no row carries a value.
    #[must_use]
    pub fn confidence_column(&self) -> Option<&str> {
        let any_value = self.observations.iter().any(|o| o.confidence.is_some());
        self.confidence_column.as_deref().filter(|_| any_value)
    }

    #[must_use]
    pub fn date_column(&self) -> Option<&str> {
        self.date_column.as_deref()
    }

    /// Raw label counts.
    #[must_use]
    pub fn counts(&self) -> LabelCounts {
        let mut counts = LabelCounts::default();
        for obs in &self.observations {
            match obs.label {
                SentimentLabel::Positive => counts.positive += 1,
                SentimentLabel::Negative => counts.negative += 1,
                SentimentLabel::Neutral => counts.neutral += 1,
            }
        }
        counts
    }

    /// Per-label confidence sums; missing confidences contribute nothing.
    #[must_use]
    pub fn confidence_weights(&self) -> LabelWeights {
        let mut weights = LabelWeights::default();
        for obs in &self.observations {
            if let Some(confidence) = obs.confidence {
                weights.add(obs.label, confidence);
            }
        }
        weights
    }

    /// Every publication time, or `None` if the date column is absent or any
    /// row's timestamp is missing or malformed.
    #[must_use]
    pub fn timestamps(&self) -> Option<Vec<NaiveDateTime>> {
        self.date_column.as_ref()?;
        self.observations.iter().map(|o| o.published_at).collect()
    }
}

impl FromIterator<SentimentObservation> for ObservationBatch {
    fn from_iter<I: IntoIterator<Item = SentimentObservation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Parses a timestamp into naive UTC.
///
/// Offset-aware values (RFC 3339, RFC 2822, `+HH:MM` suffixes) are converted
/// to UTC before the offset is dropped; naive values are taken as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
