//! Count-based sentiment signal.
//!
//! Compares raw positive and negative observation counts against fixed ratio
//! thresholds. This is the base every later stage refines.
//!
//! ## Decision order
//!
//! 1. No negatives, some positives: BUY
//! 2. No positives, some negatives: SELL
//! 3. Both present: ratio test against the thresholds, else HOLD
//! 4. All neutral: HOLD at 0.4

use sentiment_signal_core::{
    LabelCounts, ObservationBatch, ScoringContext, SentimentScorer, SignalConfig, SignalResult,
    TradeSignal,
};

/// Decision for a set of label counts, before diagnostics are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct CountDecision {
    pub signal: TradeSignal,
    /// Unrounded confidence
    pub confidence: f64,
    pub reason: String,
}

/// Applies the count decision tree.
///
/// The caller is responsible for the `min_articles` short-circuit.
#[must_use]
pub fn decide_from_counts(counts: &LabelCounts, config: &SignalConfig) -> CountDecision {
    let positive = counts.positive as f64;
    let negative = counts.negative as f64;
    let total = counts.total() as f64;

    if counts.negative == 0 && counts.positive > 0 {
        CountDecision {
            signal: TradeSignal::Buy,
            confidence: 0.9_f64.min(0.7 + (positive / total) * 0.2),
            reason: format!(
                "No negative sentiment detected, {} positive articles",
                counts.positive
            ),
        }
    } else if counts.positive == 0 && counts.negative > 0 {
        CountDecision {
            signal: TradeSignal::Sell,
            confidence: 0.9_f64.min(0.7 + (negative / total) * 0.2),
            reason: format!(
                "No positive sentiment detected, {} negative articles",
                counts.negative
            ),
        }
    } else if counts.positive > 0 && counts.negative > 0 {
        let positive_ratio = positive / negative;
        let negative_ratio = negative / positive;

        if positive_ratio >= config.positive_threshold {
            CountDecision {
                signal: TradeSignal::Buy,
                confidence: 0.9_f64
                    .min(0.6 + (positive_ratio / config.positive_threshold) * 0.3),
                reason: format!(
                    "Positive articles ({}) are {:.1}x more than negative ({})",
                    counts.positive, positive_ratio, counts.negative
                ),
            }
        } else if negative_ratio >= config.negative_threshold {
            CountDecision {
                signal: TradeSignal::Sell,
                confidence: 0.9_f64
                    .min(0.6 + (negative_ratio / config.negative_threshold) * 0.3),
                reason: format!(
                    "Negative articles ({}) are {:.1}x more than positive ({})",
                    counts.negative, negative_ratio, counts.positive
                ),
            }
        } else {
            // Extreme mixed ratios would go negative without the floor.
            CountDecision {
                signal: TradeSignal::Hold,
                confidence: (0.5 - (positive_ratio - 1.0).abs() * 0.1).max(0.0),
                reason: format!(
                    "Sentiment is mixed - positive: {}, negative: {} (ratio: {:.1})",
                    counts.positive, counts.negative, positive_ratio
                ),
            }
        }
    } else {
        CountDecision {
            signal: TradeSignal::Hold,
            confidence: 0.4,
            reason: "No clear sentiment direction detected".to_string(),
        }
    }
}

/// Count-based scorer.
#[derive(Debug, Clone)]
pub struct BasicSignal {
    name: String,
    config: SignalConfig,
}

impl Default for BasicSignal {
    fn default() -> Self {
        Self::new(SignalConfig::default())
    }
}

impl BasicSignal {
    #[must_use]
    pub fn new(config: SignalConfig) -> Self {
        Self {
            name: "basic".to_string(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Scores the batch. Needs no context: counts carry no time component.
    #[must_use]
    pub fn evaluate(&self, batch: &ObservationBatch) -> SignalResult {
        if batch.len() < self.config.min_articles {
            tracing::debug!(
                count = batch.len(),
                min = self.config.min_articles,
                "insufficient observations"
            );
            return SignalResult::insufficient(self.config.min_articles, batch.len());
        }

        let counts = batch.counts();
        let decision = decide_from_counts(&counts, &self.config);
        tracing::debug!(
            signal = %decision.signal,
            confidence = decision.confidence,
            positive = counts.positive,
            negative = counts.negative,
            neutral = counts.neutral,
            "basic signal"
        );

        let pct = |count: usize| counts.percentage(count).unwrap_or(0.0);

        SignalResult::new(decision.signal, decision.confidence, decision.reason)
            .with_detail("total_articles", counts.total())
            .with_detail("positive_count", counts.positive)
            .with_detail("negative_count", counts.negative)
            .with_detail("neutral_count", counts.neutral)
            .with_detail("positive_percentage", pct(counts.positive))
            .with_detail("negative_percentage", pct(counts.negative))
            .with_detail("neutral_percentage", pct(counts.neutral))
            .with_detail(
                "positive_to_negative_ratio",
                counts.positive as f64 / counts.negative.max(1) as f64,
            )
            .with_detail(
                "negative_to_positive_ratio",
                counts.negative as f64 / counts.positive.max(1) as f64,
            )
            .with_detail("sentiment_column_used", batch.label_column())
    }
}

impl SentimentScorer for BasicSignal {
    fn score(&self, batch: &ObservationBatch, _ctx: &ScoringContext) -> SignalResult {
        self.evaluate(batch)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::test_support::batch_from_counts;
    use sentiment_signal_core::DetailValue;

    fn basic() -> BasicSignal {
        BasicSignal::default()
    }

    // ============================================
    // Insufficient Data Tests
    // ============================================

    #[test]
    fn below_min_articles_is_insufficient() {
        // 1 positive / 1 negative / 1 neutral, below the default of 5
        let result = basic().evaluate(&batch_from_counts(1, 1, 1));
        assert_eq!(result.signal, TradeSignal::InsufficientData);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn insufficient_regardless_of_distribution() {
        for (p, n, u) in [(4, 0, 0), (0, 4, 0), (0, 0, 4), (2, 2, 0), (0, 0, 0)] {
            let result = basic().evaluate(&batch_from_counts(p, n, u));
            assert_eq!(result.signal, TradeSignal::InsufficientData);
            assert_eq!(result.confidence, 0.0);
        }
    }

    #[test]
    fn exactly_min_articles_is_scored() {
        let result = basic().evaluate(&batch_from_counts(5, 0, 0));
        assert_eq!(result.signal, TradeSignal::Buy);
    }

    // ============================================
    // One-Sided Tests
    // ============================================

    #[test]
    fn only_positive_is_buy() {
        // 6 of 10 positive: 0.7 + 0.6 * 0.2 = 0.82
        let result = basic().evaluate(&batch_from_counts(6, 0, 4));
        assert_eq!(result.signal, TradeSignal::Buy);
        assert!((result.confidence - 0.82).abs() < 1e-9);
        assert!(result.reason.contains("No negative sentiment"));
    }

    #[test]
    fn only_negative_is_sell() {
        let result = basic().evaluate(&batch_from_counts(0, 5, 5));
        assert_eq!(result.signal, TradeSignal::Sell);
        assert!((result.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn one_sided_confidence_within_bounds() {
        for (p, u) in [(1, 9), (5, 0), (3, 20), (50, 1)] {
            let buy = basic().evaluate(&batch_from_counts(p, 0, u));
            assert_eq!(buy.signal, TradeSignal::Buy);
            assert!(buy.confidence > 0.7 && buy.confidence <= 0.9);

            let sell = basic().evaluate(&batch_from_counts(0, p, u));
            assert_eq!(sell.signal, TradeSignal::Sell);
            assert!(sell.confidence > 0.7 && sell.confidence <= 0.9);
        }
    }

    // ============================================
    // Ratio Tests
    // ============================================

    #[test]
    fn dominant_positive_is_buy_capped() {
        // 15 / 3 / 2: ratio 5.0, 0.6 + 2.5 * 0.3 capped at 0.9
        let result = basic().evaluate(&batch_from_counts(15, 3, 2));
        assert_eq!(result.signal, TradeSignal::Buy);
        assert!((result.confidence - 0.9).abs() < 1e-9);
        assert!(result.reason.contains("5.0x"));
    }

    #[test]
    fn dominant_negative_is_sell() {
        // 2 / 14 / 4: negative ratio 7.0
        let result = basic().evaluate(&batch_from_counts(2, 14, 4));
        assert_eq!(result.signal, TradeSignal::Sell);
        assert!((result.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn ratio_exactly_at_threshold_is_buy() {
        // 4 / 2: ratio 2.0 meets >= 2.0, confidence 0.6 + 1.0 * 0.3
        let result = basic().evaluate(&batch_from_counts(4, 2, 0));
        assert_eq!(result.signal, TradeSignal::Buy);
        assert!((result.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn mixed_sentiment_is_hold() {
        // 8 / 7 / 5: ratio ~1.143, 0.5 - 0.143 * 0.1 = 0.486
        let result = basic().evaluate(&batch_from_counts(8, 7, 5));
        assert_eq!(result.signal, TradeSignal::Hold);
        assert!((result.confidence - 0.486).abs() < 1e-9);
        assert!(result.reason.contains("mixed"));
    }

    #[test]
    fn all_neutral_is_hold_at_point_four() {
        let result = basic().evaluate(&batch_from_counts(0, 0, 6));
        assert_eq!(result.signal, TradeSignal::Hold);
        assert!((result.confidence - 0.4).abs() < 1e-9);
    }

    #[test]
    fn hold_confidence_floored_at_zero() {
        // With high thresholds a 12:1 split stays HOLD; 0.5 - 11 * 0.1 < 0
        let config = SignalConfig {
            positive_threshold: 20.0,
            negative_threshold: 20.0,
            ..SignalConfig::default()
        };
        let result = BasicSignal::new(config).evaluate(&batch_from_counts(12, 1, 0));
        assert_eq!(result.signal, TradeSignal::Hold);
        assert_eq!(result.confidence, 0.0);
    }

    // ============================================
    // Diagnostics Tests
    // ============================================

    #[test]
    fn details_record_counts_percentages_and_ratios() {
        let result = basic().evaluate(&batch_from_counts(15, 3, 2));

        assert_eq!(result.details["total_articles"], DetailValue::Count(20));
        assert_eq!(result.details["positive_count"], DetailValue::Count(15));
        assert_eq!(result.detail_f64("positive_percentage"), Some(75.0));
        assert_eq!(result.detail_f64("neutral_percentage"), Some(10.0));
        assert_eq!(result.detail_f64("positive_to_negative_ratio"), Some(5.0));
        assert_eq!(
            result.details["sentiment_column_used"],
            DetailValue::Text("combined_sentiment_label".to_string())
        );
    }

    #[test]
    fn ratio_denominators_floored_at_one() {
        let result = basic().evaluate(&batch_from_counts(7, 0, 0));
        assert_eq!(result.detail_f64("positive_to_negative_ratio"), Some(7.0));
        assert_eq!(result.detail_f64("negative_to_positive_ratio"), Some(0.0));
    }

    #[test]
    fn repeated_evaluation_is_identical() {
        let batch = batch_from_counts(9, 4, 3);
        let first = basic().evaluate(&batch);
        let second = basic().evaluate(&batch);
        assert!(first.same_outcome(&second));
        assert_eq!(first.reason, second.reason);
    }

    #[test]
    fn scorer_name() {
        assert_eq!(basic().name(), "basic");
    }
}
