use crate::error::SignalError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub signal: SignalConfig,
    pub columns: ColumnConfig,
    pub classifier: ClassifierConfig,
}

/// Thresholds and weights shared by every scoring stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Positive/negative ratio required for BUY
    pub positive_threshold: f64,
    /// Negative/positive ratio required for SELL
    pub negative_threshold: f64,
    /// Observations required before any directional signal is produced
    pub min_articles: usize,
    /// Scales the confidence bump applied by the weighted stage
    pub confidence_weight: f64,
    /// Observations at most this many days old count double in the time-weighted stage
    pub recent_days: i64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            positive_threshold: 2.0,
            negative_threshold: 2.0,
            min_articles: 5,
            confidence_weight: 0.3,
            recent_days: 7,
        }
    }
}

impl SignalConfig {
    /// Checks that thresholds and weights are usable.
    ///
    /// # Errors
    ///
    /// Returns `SignalError::InvalidConfig` describing the first bad field.
    pub fn validate(&self) -> Result<(), SignalError> {
        for (name, value) in [
            ("positive_threshold", self.positive_threshold),
            ("negative_threshold", self.negative_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SignalError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        if self.min_articles == 0 {
            return Err(SignalError::InvalidConfig(
                "min_articles must be at least 1".to_string(),
            ));
        }

        if !self.confidence_weight.is_finite() || self.confidence_weight < 0.0 {
            return Err(SignalError::InvalidConfig(format!(
                "confidence_weight must be non-negative, got {}",
                self.confidence_weight
            )));
        }

        if self.recent_days < 0 {
            return Err(SignalError::InvalidConfig(format!(
                "recent_days must be non-negative, got {}",
                self.recent_days
            )));
        }

        Ok(())
    }
}

/// Names of the input columns read during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub label_column: String,
    pub confidence_column: String,
    pub date_column: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            label_column: "combined_sentiment_label".to_string(),
            confidence_column: "combined_sentiment_confidence".to_string(),
            date_column: "published_at".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Text handed to the classifier is truncated to this many characters
    pub max_chars: usize,
    /// Winning score must exceed this to be labelled positive/negative
    pub label_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_chars: 512,
            label_threshold: 0.6,
        }
    }
}
