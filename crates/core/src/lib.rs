pub mod config;
pub mod config_loader;
pub mod error;
pub mod observation;
pub mod reader;
pub mod report;
pub mod signal;
pub mod summary_formatter;
pub mod traits;

pub use config::{AppConfig, ClassifierConfig, ColumnConfig, SignalConfig};
pub use config_loader::ConfigLoader;
pub use error::SignalError;
pub use observation::{
    parse_timestamp, LabelCounts, LabelWeights, ObservationBatch, RecordSet, SentimentLabel,
    SentimentObservation,
};
pub use reader::{load_batch, read_csv, read_json, read_records};
pub use report::{AnalysisReport, ReportSignal, RiskLevel, SentimentBreakdown, SignalDetails};
pub use signal::{
    bump_confidence, round_confidence, DetailValue, ScoringContext, SentimentScorer,
    SignalResult, TradeSignal, MAX_CONFIDENCE,
};
pub use summary_formatter::SignalSummaryFormatter;
pub use traits::{label_from_scores, Classification, ClassifierScores, SentimentClassifier};
