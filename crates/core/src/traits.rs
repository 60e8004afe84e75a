use crate::error::SignalError;
use crate::observation::SentimentLabel;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Raw scores returned by a sentiment model for one text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierScores {
    pub positive: f64,
    pub negative: f64,
}

/// Label and confidence derived from [`ClassifierScores`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: SentimentLabel,
    pub confidence: f64,
}

impl Classification {
    /// Neutral with zero confidence, used for empty text and classifier failures.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            confidence: 0.0,
        }
    }
}

impl ClassifierScores {
    /// Label and confidence for these scores, see [`label_from_scores`].
    #[must_use]
    pub fn classify(self, threshold: f64) -> Classification {
        label_from_scores(self.positive, self.negative, threshold)
    }
}

/// Maps a positive/negative score pair to a label: the larger score wins
/// only if it exceeds `threshold`, otherwise the text is neutral. The
/// confidence is always the larger score.
#[must_use]
pub fn label_from_scores(positive: f64, negative: f64, threshold: f64) -> Classification {
    let label = if positive > negative && positive > threshold {
        SentimentLabel::Positive
    } else if negative > positive && negative > threshold {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };
    Classification {
        label,
        confidence: positive.max(negative),
    }
}

/// External text classifier.
///
/// Owned by the caller and injected into the pipeline; implementations must
/// be stateless from the pipeline's point of view. Text is truncated before
/// it reaches the classifier.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Scores one piece of text.
    ///
    /// # Errors
    /// Returns error if the underlying model fails.
    async fn classify(&self, text: &str) -> Result<ClassifierScores, SignalError>;

    /// Returns the model name for logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_positive_labelled_positive() {
        let c = ClassifierScores {
            positive: 0.92,
            negative: 0.08,
        }
        .classify(0.6);
        assert_eq!(c.label, SentimentLabel::Positive);
        assert!((c.confidence - 0.92).abs() < 1e-12);
    }

    #[test]
    fn strong_negative_labelled_negative() {
        let c = ClassifierScores {
            positive: 0.1,
            negative: 0.85,
        }
        .classify(0.6);
        assert_eq!(c.label, SentimentLabel::Negative);
    }

    #[test]
    fn weak_winner_is_neutral_with_max_confidence() {
        let c = ClassifierScores {
            positive: 0.55,
            negative: 0.45,
        }
        .classify(0.6);
        assert_eq!(c.label, SentimentLabel::Neutral);
        assert!((c.confidence - 0.55).abs() < 1e-12);
    }

    #[test]
    fn label_from_scores_matches_classify() {
        let c = label_from_scores(0.2, 0.75, 0.6);
        assert_eq!(c.label, SentimentLabel::Negative);
        assert!((c.confidence - 0.75).abs() < 1e-12);
    }

    #[test]
    fn tie_is_neutral() {
        let c = ClassifierScores {
            positive: 0.7,
            negative: 0.7,
        }
        .classify(0.6);
        assert_eq!(c.label, SentimentLabel::Neutral);
    }

    struct EchoLength;

    #[async_trait]
    impl SentimentClassifier for EchoLength {
        async fn classify(&self, text: &str) -> Result<ClassifierScores, SignalError> {
            if text.is_empty() {
                return Err(SignalError::Classifier("empty input".to_string()));
            }
            let positive = (text.len() as f64 / 100.0).min(1.0);
            Ok(ClassifierScores {
                positive,
                negative: 1.0 - positive,
            })
        }

        fn name(&self) -> &str {
            "echo-length"
        }
    }

    #[tokio::test]
    async fn classifier_usable_as_trait_object() {
        let classifier: std::sync::Arc<dyn SentimentClassifier> = std::sync::Arc::new(EchoLength);
        let scores = classifier.classify(&"x".repeat(90)).await.unwrap();
        assert_eq!(scores.classify(0.6).label, SentimentLabel::Positive);
        assert!(matches!(
            classifier.classify("").await,
            Err(SignalError::Classifier(_))
        ));
    }
}
