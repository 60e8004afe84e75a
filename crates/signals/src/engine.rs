//! Signal engine: method dispatch and report building.
//!
//! Holds one instance of every scoring stage for a validated configuration
//! and turns a batch (or a failed load) into the caller-facing
//! [`AnalysisReport`].

use crate::generator::{BasicSignal, ConsensusSignal, TimeWeightedSignal, WeightedSignal};
use chrono::Utc;
use sentiment_signal_core::{
    AnalysisReport, ObservationBatch, ScoringContext, SentimentScorer, SignalConfig, SignalDetails,
    SignalError, SignalResult,
};
use std::fmt;
use std::str::FromStr;

/// Scoring method selectable by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScoringMethod {
    Basic,
    Weighted,
    TimeWeighted,
    #[default]
    Consensus,
}

impl ScoringMethod {
    pub const ALL: [ScoringMethod; 4] = [
        ScoringMethod::Basic,
        ScoringMethod::Weighted,
        ScoringMethod::TimeWeighted,
        ScoringMethod::Consensus,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Weighted => "weighted",
            Self::TimeWeighted => "time-weighted",
            Self::Consensus => "consensus",
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringMethod {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "weighted" => Ok(Self::Weighted),
            "time-weighted" | "time_weighted" => Ok(Self::TimeWeighted),
            "consensus" => Ok(Self::Consensus),
            other => Err(SignalError::InvalidConfig(format!(
                "unknown scoring method '{other}', expected one of: basic, weighted, time-weighted, consensus"
            ))),
        }
    }
}

/// Runs the scoring stages for one configuration.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    config: SignalConfig,
    basic: BasicSignal,
    weighted: WeightedSignal,
    time_weighted: TimeWeightedSignal,
    consensus: ConsensusSignal,
}

impl SignalEngine {
    /// Creates an engine after validating the configuration.
    ///
    /// # Errors
    /// Returns `SignalError::InvalidConfig` if a threshold or limit is out of range.
    pub fn new(config: SignalConfig) -> Result<Self, SignalError> {
        config.validate()?;
        Ok(Self {
            basic: BasicSignal::new(config.clone()),
            weighted: WeightedSignal::new(config.clone()),
            time_weighted: TimeWeightedSignal::new(config.clone()),
            consensus: ConsensusSignal::new(config.clone()),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Returns the scorer behind a method.
    #[must_use]
    pub fn scorer(&self, method: ScoringMethod) -> &dyn SentimentScorer {
        match method {
            ScoringMethod::Basic => &self.basic,
            ScoringMethod::Weighted => &self.weighted,
            ScoringMethod::TimeWeighted => &self.time_weighted,
            ScoringMethod::Consensus => &self.consensus,
        }
    }

    /// Scores the batch with a single method.
    #[must_use]
    pub fn score_with(
        &self,
        method: ScoringMethod,
        batch: &ObservationBatch,
        ctx: &ScoringContext,
    ) -> SignalResult {
        self.scorer(method).score(batch, ctx)
    }

    /// Scores the batch with every method, in [`ScoringMethod::ALL`] order.
    #[must_use]
    pub fn evaluate(
        &self,
        batch: &ObservationBatch,
        ctx: &ScoringContext,
    ) -> Vec<(ScoringMethod, SignalResult)> {
        ScoringMethod::ALL
            .iter()
            .map(|method| (*method, self.score_with(*method, batch, ctx)))
            .collect()
    }

    /// Builds the consensus report for a batch.
    #[must_use]
    pub fn analyze(
        &self,
        company: &str,
        batch: &ObservationBatch,
        ctx: &ScoringContext,
    ) -> AnalysisReport {
        let outcome = self.consensus.evaluate(batch, ctx);

        tracing::info!(
            company,
            articles = batch.len(),
            signal = %outcome.signal,
            confidence = outcome.confidence,
            "analysis complete"
        );

        AnalysisReport {
            success: true,
            signal: outcome.signal.into(),
            confidence: outcome.confidence,
            company: company.to_string(),
            analysis_timestamp: Utc::now(),
            total_articles: Some(batch.len()),
            sentiment_breakdown: Some(batch.counts().into()),
            signal_details: Some(SignalDetails {
                basic_signal: outcome.basic.signal,
                weighted_signal: outcome.weighted.signal,
                time_weighted_signal: outcome.time_weighted.signal,
                basic_confidence: outcome.basic.confidence,
                weighted_confidence: outcome.weighted.confidence,
                time_weighted_confidence: outcome.time_weighted.confidence,
            }),
            reasoning: Some(outcome.reason().to_string()),
            error: None,
        }
    }

    /// Builds the report for a load result, turning a load error into an error report.
    #[must_use]
    pub fn analyze_loaded(
        &self,
        company: &str,
        loaded: Result<ObservationBatch, SignalError>,
        ctx: &ScoringContext,
    ) -> AnalysisReport {
        match loaded {
            Ok(batch) => self.analyze(company, &batch, ctx),
            Err(e) => {
                tracing::error!(company, error = %e, "analysis failed");
                AnalysisReport::failure(company, e)
            }
        }
    }
}
