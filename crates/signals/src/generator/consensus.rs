//! Consensus over the three scoring stages.
//!
//! Each stage is computed from the original batch, then a majority vote picks
//! the signal and the stage confidences are averaged.

use super::basic::BasicSignal;
use super::time_weighted::TimeWeightedSignal;
use super::weighted::WeightedSignal;
use sentiment_signal_core::{
    ObservationBatch, ScoringContext, SentimentScorer, SignalConfig, SignalResult, TradeSignal,
};
use serde::Serialize;

/// Majority vote: BUY or SELL with at least two votes, otherwise HOLD.
///
/// INSUFFICIENT_DATA is an ordinary vote, so two short-circuited stages
/// still resolve to HOLD.
#[must_use]
pub fn majority_vote(signals: &[TradeSignal]) -> TradeSignal {
    let votes = |target: TradeSignal| signals.iter().filter(|s| **s == target).count();

    if votes(TradeSignal::Buy) >= 2 {
        TradeSignal::Buy
    } else if votes(TradeSignal::Sell) >= 2 {
        TradeSignal::Sell
    } else {
        TradeSignal::Hold
    }
}

/// Stage results plus the combined decision.
#[derive(Debug, Clone, Serialize)]
pub struct ConsensusOutcome {
    pub signal: TradeSignal,
    /// Mean of the three stage confidences, unrounded
    pub confidence: f64,
    pub basic: SignalResult,
    pub weighted: SignalResult,
    pub time_weighted: SignalResult,
}

impl ConsensusOutcome {
    /// Combines three stage results.
    #[must_use]
    pub fn from_stages(
        basic: SignalResult,
        weighted: SignalResult,
        time_weighted: SignalResult,
    ) -> Self {
        let signal = majority_vote(&[basic.signal, weighted.signal, time_weighted.signal]);
        let confidence = (basic.confidence + weighted.confidence + time_weighted.confidence) / 3.0;
        Self {
            signal,
            confidence,
            basic,
            weighted,
            time_weighted,
        }
    }

    /// Caller-facing explanation, taken from the weighted stage.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.weighted.reason
    }
}

/// Runs all three stages and votes.
#[derive(Debug, Clone)]
pub struct ConsensusSignal {
    name: String,
    basic: BasicSignal,
    weighted: WeightedSignal,
    time_weighted: TimeWeightedSignal,
}

impl Default for ConsensusSignal {
    fn default() -> Self {
        Self::new(SignalConfig::default())
    }
}

impl ConsensusSignal {
    #[must_use]
    pub fn new(config: SignalConfig) -> Self {
        Self {
            name: "consensus".to_string(),
            basic: BasicSignal::new(config.clone()),
            weighted: WeightedSignal::new(config.clone()),
            time_weighted: TimeWeightedSignal::new(config),
        }
    }

    #[must_use]
    pub fn evaluate(&self, batch: &ObservationBatch, ctx: &ScoringContext) -> ConsensusOutcome {
        let basic = self.basic.evaluate(batch);
        let weighted = self.weighted.evaluate(batch);
        let time_weighted = self.time_weighted.evaluate(batch, ctx);

        let outcome = ConsensusOutcome::from_stages(basic, weighted, time_weighted);
        tracing::info!(
            signal = %outcome.signal,
            confidence = outcome.confidence,
            basic = %outcome.basic.signal,
            weighted = %outcome.weighted.signal,
            time_weighted = %outcome.time_weighted.signal,
            "consensus signal"
        );
        outcome
    }
}

impl SentimentScorer for ConsensusSignal {
    fn score(&self, batch: &ObservationBatch, ctx: &ScoringContext) -> SignalResult {
        let outcome = self.evaluate(batch, ctx);
        SignalResult::new(outcome.signal, outcome.confidence, outcome.reason())
            .with_detail("basic_signal", outcome.basic.signal.as_str())
            .with_detail("weighted_signal", outcome.weighted.signal.as_str())
            .with_detail("time_weighted_signal", outcome.time_weighted.signal.as_str())
            .with_detail("basic_confidence", outcome.basic.confidence)
            .with_detail("weighted_confidence", outcome.weighted.confidence)
            .with_detail("time_weighted_confidence", outcome.time_weighted.confidence)
            .extending(&outcome.time_weighted)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
