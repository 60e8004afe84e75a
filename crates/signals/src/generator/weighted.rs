//! Confidence-weighted sentiment signal.
//!
//! Re-derives the signal from per-label confidence sums and layers the
//! result over the count-based signal. The override can contradict the base.

use super::basic::BasicSignal;
use sentiment_signal_core::{
    bump_confidence, ObservationBatch, ScoringContext, SentimentScorer, SignalConfig,
    SignalResult, TradeSignal,
};

/// Confidence-weighted scorer.
#[derive(Debug, Clone)]
pub struct WeightedSignal {
    name: String,
    config: SignalConfig,
    basic: BasicSignal,
}

impl Default for WeightedSignal {
    fn default() -> Self {
        Self::new(SignalConfig::default())
    }
}

impl WeightedSignal {
    #[must_use]
    pub fn new(config: SignalConfig) -> Self {
        Self {
            name: "weighted".to_string(),
            basic: BasicSignal::new(config.clone()),
            config,
        }
    }

    /// Computes the count-based base, then layers the weighted override on it.
    #[must_use]
    pub fn evaluate(&self, batch: &ObservationBatch) -> SignalResult {
        self.evaluate_with_base(batch, self.basic.evaluate(batch))
    }

    /// Layers the weighted override on an existing base result.
    ///
    /// The base is returned unchanged when it is INSUFFICIENT_DATA, when the
    /// batch carries no confidences, or when the confidences sum to zero.
    #[must_use]
    pub fn evaluate_with_base(&self, batch: &ObservationBatch, base: SignalResult) -> SignalResult {
        if base.signal == TradeSignal::InsufficientData {
            return base;
        }

        let Some(confidence_column) = batch.confidence_column() else {
            tracing::debug!("no confidence values, passing base signal through");
            return base;
        };

        let weights = batch.confidence_weights();
        let Some((positive_pct, negative_pct, neutral_pct)) = weights.percentages() else {
            tracing::debug!("zero total confidence weight, passing base signal through");
            return base;
        };

        let mut signal = base.signal;
        let mut confidence = base.confidence;
        let mut reason = base.reason.clone();
        let bump = self.config.confidence_weight * 0.2;

        if positive_pct > negative_pct * self.config.positive_threshold {
            if signal != TradeSignal::Buy {
                signal = TradeSignal::Buy;
                reason = format!(
                    "Weighted analysis: {positive_pct:.1}% positive vs {negative_pct:.1}% negative"
                );
            }
            confidence = bump_confidence(confidence, bump);
        } else if negative_pct > positive_pct * self.config.negative_threshold {
            if signal != TradeSignal::Sell {
                signal = TradeSignal::Sell;
                reason = format!(
                    "Weighted analysis: {negative_pct:.1}% negative vs {positive_pct:.1}% positive"
                );
            }
            confidence = bump_confidence(confidence, bump);
        }

        tracing::debug!(
            base = %base.signal,
            %signal,
            confidence,
            positive_pct,
            negative_pct,
            "weighted signal"
        );

        SignalResult::new(signal, confidence, reason)
            .with_detail("weighted_positive_percentage", positive_pct)
            .with_detail("weighted_negative_percentage", negative_pct)
            .with_detail("weighted_neutral_percentage", neutral_pct)
            .with_detail("confidence_column_used", confidence_column)
            .with_detail("total_confidence_weight", weights.total())
            .extending(&base)
    }
}

impl SentimentScorer for WeightedSignal {
    fn score(&self, batch: &ObservationBatch, _ctx: &ScoringContext) -> SignalResult {
        self.evaluate(batch)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
