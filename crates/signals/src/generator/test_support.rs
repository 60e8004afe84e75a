//! Batch builders shared by the generator tests.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use sentiment_signal_core::{ObservationBatch, ScoringContext, SentimentLabel, SentimentObservation};

pub(crate) fn reference_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 29)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub(crate) fn ctx() -> ScoringContext {
    ScoringContext::at(reference_time())
}

pub(crate) fn obs(label: SentimentLabel, confidence: f64, days_ago: i64) -> SentimentObservation {
    SentimentObservation::new(
        label,
        confidence,
        reference_time() - Duration::days(days_ago),
    )
}

/// Batch with uniform confidence 0.8, everything published a day ago.
pub(crate) fn batch_from_counts(positive: usize, negative: usize, neutral: usize) -> ObservationBatch {
    let mut observations = Vec::with_capacity(positive + negative + neutral);
    for (label, n) in [
        (SentimentLabel::Positive, positive),
        (SentimentLabel::Negative, negative),
        (SentimentLabel::Neutral, neutral),
    ] {
        observations.extend((0..n).map(|_| obs(label, 0.8, 1)));
    }
    ObservationBatch::new(observations)
}
