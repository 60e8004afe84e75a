//! Recency-weighted sentiment signal.
//!
//! Observations published within the recency window count double. The
//! override compares absolute weighted sums, not percentages, and is layered
//! over the confidence-weighted signal.

use super::weighted::WeightedSignal;
use chrono::NaiveDateTime;
use sentiment_signal_core::{
    bump_confidence, LabelWeights, ObservationBatch, ScoringContext, SentimentScorer,
    SignalConfig, SignalResult, TradeSignal,
};

/// Weight of an observation inside the recency window.
pub const RECENT_WEIGHT: f64 = 2.0;
/// Weight of every other observation.
pub const BASELINE_WEIGHT: f64 = 1.0;
/// Confidence added when the time-weighted override fires.
const TIME_WEIGHT_BUMP: f64 = 0.1;

/// Whole days between `published_at` and `now`, never negative.
///
/// Future-dated and same-day observations are age zero.
#[must_use]
pub fn age_in_days(published_at: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (now - published_at).num_days().max(0)
}

/// Recency weight for an observation of the given age.
#[must_use]
pub fn recency_weight(age_days: i64, recent_days: i64) -> f64 {
    if age_days <= recent_days {
        RECENT_WEIGHT
    } else {
        BASELINE_WEIGHT
    }
}

/// Recency-weighted scorer.
#[derive(Debug, Clone)]
pub struct TimeWeightedSignal {
    name: String,
    config: SignalConfig,
    weighted: WeightedSignal,
}

impl Default for TimeWeightedSignal {
    fn default() -> Self {
        Self::new(SignalConfig::default())
    }
}

impl TimeWeightedSignal {
    #[must_use]
    pub fn new(config: SignalConfig) -> Self {
        Self {
            name: "time_weighted".to_string(),
            weighted: WeightedSignal::new(config.clone()),
            config,
        }
    }

    /// Computes the confidence-weighted base, then layers the recency override on it.
    #[must_use]
    pub fn evaluate(&self, batch: &ObservationBatch, ctx: &ScoringContext) -> SignalResult {
        self.evaluate_with_base(batch, self.weighted.evaluate(batch), ctx)
    }

    /// Layers the recency override on an existing base result.
    ///
    /// INSUFFICIENT_DATA is terminal and returned as-is. A batch without
    /// usable timestamps falls back to the base with a warning.
    #[must_use]
    pub fn evaluate_with_base(
        &self,
        batch: &ObservationBatch,
        base: SignalResult,
        ctx: &ScoringContext,
    ) -> SignalResult {
        if base.signal == TradeSignal::InsufficientData {
            return base;
        }

        let Some(timestamps) = batch.timestamps() else {
            tracing::warn!(
                date_column = batch.date_column().unwrap_or("<absent>"),
                "could not calculate time weights from publication dates, \
                 falling back to weighted signal"
            );
            return base;
        };

        let recent_days = self.config.recent_days;
        let mut weights = LabelWeights::default();
        let mut recent_count = 0usize;

        for (obs, published_at) in batch.observations().iter().zip(&timestamps) {
            let age = age_in_days(*published_at, ctx.now);
            if age <= recent_days {
                recent_count += 1;
            }
            weights.add(obs.label, recency_weight(age, recent_days));
        }

        let Some((positive_pct, negative_pct, _)) = weights.percentages() else {
            return base;
        };

        let mut signal = base.signal;
        let mut confidence = base.confidence;
        let mut reason = base.reason.clone();

        if weights.positive > weights.negative * self.config.positive_threshold {
            signal = TradeSignal::Buy;
            reason = format!(
                "Time-weighted analysis favors BUY: {positive_pct:.1}% positive (recent articles weighted 2x)"
            );
            confidence = bump_confidence(confidence, TIME_WEIGHT_BUMP);
        } else if weights.negative > weights.positive * self.config.negative_threshold {
            signal = TradeSignal::Sell;
            reason = format!(
                "Time-weighted analysis favors SELL: {negative_pct:.1}% negative (recent articles weighted 2x)"
            );
            confidence = bump_confidence(confidence, TIME_WEIGHT_BUMP);
        }

        tracing::debug!(
            base = %base.signal,
            %signal,
            confidence,
            recent_count,
            positive_weight = weights.positive,
            negative_weight = weights.negative,
            "time-weighted signal"
        );

        SignalResult::new(signal, confidence, reason)
            .with_detail("time_weighted_positive_percentage", positive_pct)
            .with_detail("time_weighted_negative_percentage", negative_pct)
            .with_detail("recent_days_threshold", recent_days)
            .with_detail("articles_in_recent_period", recent_count)
            .extending(&base)
    }
}

impl SentimentScorer for TimeWeightedSignal {
    fn score(&self, batch: &ObservationBatch, ctx: &ScoringContext) -> SignalResult {
        self.evaluate(batch, ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
