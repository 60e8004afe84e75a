//! Lexicon classifier for running without a model.

use async_trait::async_trait;
use sentiment_signal_core::{ClassifierScores, SentimentClassifier, SignalError};

const BULLISH_KEYWORDS: &[&str] = &[
    "surge", "surges", "surged", "rally", "rallies", "soar", "soars", "soared",
    "bullish", "breakout", "beat", "beats", "record", "growth", "gain", "gains",
    "profit", "profits", "upgrade", "upgraded", "outperform", "strong", "boost",
    "boosts", "partnership", "adoption", "breakthrough", "expands", "expansion",
    "rise", "rises", "rising", "jump", "jumps", "jumped",
];

const BEARISH_KEYWORDS: &[&str] = &[
    "crash", "crashes", "plunge", "plunges", "plunged", "dump", "bearish",
    "collapse", "collapses", "lawsuit", "ban", "hack", "hacked", "breach", "fraud",
    "scam", "selloff", "sell-off", "panic", "fear", "miss", "misses", "loss",
    "losses", "downgrade", "downgraded", "underperform", "weak", "decline",
    "declines", "fall", "falls", "drop", "drops", "slump", "layoffs", "recall",
    "investigation",
];

/// Counts bullish and bearish keyword hits and turns them into scores.
///
/// Scores use add-one smoothing, `(hits + 1) / (total + 2)`, so a single hit
/// yields 0.667 and text without hits scores 0.5 on both sides.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    name: String,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "keyword".to_string(),
        }
    }

    /// Bullish and bearish hit counts for `text`.
    #[must_use]
    pub fn hits(text: &str) -> (usize, usize) {
        let mut bullish = 0;
        let mut bearish = 0;

        for token in text
            .split(|c: char| !(c.is_alphanumeric() || c == '-'))
            .map(|t| t.trim_matches('-').to_lowercase())
            .filter(|t| !t.is_empty())
        {
            if BULLISH_KEYWORDS.contains(&token.as_str()) {
                bullish += 1;
            } else if BEARISH_KEYWORDS.contains(&token.as_str()) {
                bearish += 1;
            }
        }

        (bullish, bearish)
    }

    #[must_use]
    pub fn scores(text: &str) -> ClassifierScores {
        let (bullish, bearish) = Self::hits(text);
        let total = (bullish + bearish) as f64;
        ClassifierScores {
            positive: (bullish as f64 + 1.0) / (total + 2.0),
            negative: (bearish as f64 + 1.0) / (total + 2.0),
        }
    }
}

#[async_trait]
impl SentimentClassifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> Result<ClassifierScores, SignalError> {
        Ok(Self::scores(text))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_signal_core::SentimentLabel;

    #[test]
    fn counts_hits_case_insensitively() {
        assert_eq!(KeywordClassifier::hits("Shares SURGE after record profits"), (3, 0));
        assert_eq!(KeywordClassifier::hits("Stock plunges; lawsuit filed."), (0, 2));
        assert_eq!(KeywordClassifier::hits("Quarterly sell-off deepens"), (0, 1));
    }

    #[test]
    fn no_hits_is_even() {
        let scores = KeywordClassifier::scores("Company holds annual meeting");
        assert!((scores.positive - 0.5).abs() < 1e-12);
        assert!((scores.negative - 0.5).abs() < 1e-12);
        assert_eq!(scores.classify(0.6).label, SentimentLabel::Neutral);
    }

    #[test]
    fn single_hit_clears_default_threshold() {
        let scores = KeywordClassifier::scores("Analysts upgrade the stock");
        assert!((scores.positive - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(scores.classify(0.6).label, SentimentLabel::Positive);
    }

    #[test]
    fn balanced_hits_are_neutral() {
        let scores = KeywordClassifier::scores("Gains erased by late losses");
        assert_eq!(scores.classify(0.6).label, SentimentLabel::Neutral);
    }

    #[tokio::test]
    async fn classifier_trait_returns_scores() {
        let classifier = KeywordClassifier::new();
        let scores = classifier.classify("Regulators open fraud investigation").await.unwrap();
        assert!(scores.negative > scores.positive);
        assert_eq!(classifier.name(), "keyword");
    }
}
