//! Sentiment scoring stages, consensus engine and article classification.
//!
//! The stages refine each other in a fixed order (count-based, confidence
//! weighted, recency weighted) and the engine votes across them to produce
//! an [`AnalysisReport`](sentiment_signal_core::AnalysisReport).

pub mod classifier;
pub mod engine;
pub mod generator;

pub use classifier::{Article, ArticleAnalyzer, ArticleField, KeywordClassifier};
pub use engine::{ScoringMethod, SignalEngine};
pub use generator::{
    age_in_days, decide_from_counts, majority_vote, recency_weight, BasicSignal,
    ConsensusOutcome, ConsensusSignal, CountDecision, TimeWeightedSignal, WeightedSignal,
    BASELINE_WEIGHT, RECENT_WEIGHT,
};
