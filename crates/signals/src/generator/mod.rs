//! Sentiment scorers.
//!
//! Each stage refines the one before it: counts, then confidence weights,
//! then recency weights. The consensus scorer votes across all three.

mod basic;
mod consensus;
mod time_weighted;
mod weighted;

#[cfg(test)]
pub(crate) mod test_support;

pub use basic::{decide_from_counts, BasicSignal, CountDecision};
pub use consensus::{majority_vote, ConsensusOutcome, ConsensusSignal};
pub use time_weighted::{
    age_in_days, recency_weight, TimeWeightedSignal, BASELINE_WEIGHT, RECENT_WEIGHT,
};
pub use weighted::WeightedSignal;
