//! End-to-end tests: file on disk to analysis report.

use chrono::NaiveDate;
use sentiment_signal_core::{load_batch, ColumnConfig, ReportSignal, ScoringContext, SignalConfig, TradeSignal};
use sentiment_signal_engine::{Article, ArticleAnalyzer, KeywordClassifier, ScoringMethod, SignalEngine};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

// =============================================================================
// Helper Functions
// =============================================================================

fn ctx() -> ScoringContext {
    ScoringContext::at(
        NaiveDate::from_ymd_opt(2025, 1, 29)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
    )
}

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn csv_rows(labels: &[(&str, usize)], date: &str) -> String {
    let mut out = String::from(
        "title,combined_sentiment_label,combined_sentiment_confidence,published_at\n",
    );
    for (label, n) in labels {
        for i in 0..*n {
            out.push_str(&format!("headline {label} {i},{label},0.8,{date}\n"));
        }
    }
    out
}

fn engine() -> SignalEngine {
    SignalEngine::new(SignalConfig::default()).unwrap()
}

// =============================================================================
// CSV Pipeline
// =============================================================================

#[test]
fn csv_positive_batch_produces_buy_report() {
    let file = temp_file(
        ".csv",
        &csv_rows(
            &[("positive", 15), ("negative", 3), ("neutral", 2)],
            "2025-01-28T09:30:00Z",
        ),
    );

    let batch = load_batch(file.path(), &ColumnConfig::default()).unwrap();
    let report = engine().analyze("Acme", &batch, &ctx());

    assert!(report.success);
    assert_eq!(report.signal, ReportSignal::Buy);
    assert_eq!(report.total_articles, Some(20));
    let details = report.signal_details.unwrap();
    assert_eq!(details.time_weighted_signal, TradeSignal::Buy);
    assert!((details.weighted_confidence - 0.95).abs() < 1e-9);
}

#[test]
fn csv_without_dates_falls_back_to_weighted() {
    let csv = "combined_sentiment_label,combined_sentiment_confidence\n\
               positive,0.9\npositive,0.9\npositive,0.9\npositive,0.9\n\
               negative,0.2\nnegative,0.2\nnegative,0.2\nnegative,0.2\nneutral,0.5\n";
    let file = temp_file(".csv", csv);
    let batch = load_batch(file.path(), &ColumnConfig::default()).unwrap();

    let engine = engine();
    let weighted = engine.score_with(ScoringMethod::Weighted, &batch, &ctx());
    let time_weighted = engine.score_with(ScoringMethod::TimeWeighted, &batch, &ctx());
    assert_eq!(weighted.signal, TradeSignal::Buy);
    assert!(time_weighted.same_outcome(&weighted));
}

#[test]
fn missing_label_column_yields_error_report() {
    let file = temp_file(".csv", "title,sentiment\nA,positive\n");
    let report = engine().analyze_loaded(
        "Acme",
        load_batch(file.path(), &ColumnConfig::default()),
        &ctx(),
    );

    assert!(!report.success);
    assert_eq!(report.signal, ReportSignal::Error);
    assert_eq!(report.confidence, 0.0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["signal"], "ERROR");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("combined_sentiment_label"));
}

// =============================================================================
// JSON Pipeline
// =============================================================================

#[test]
fn json_with_custom_columns() {
    let rows: Vec<String> = (0..6)
        .map(|i| {
            format!(
                r#"{{"label": "Negative", "score": {}, "date": "2025-01-2{} 08:00:00"}}"#,
                0.7,
                i % 3 + 5
            )
        })
        .collect();
    let file = temp_file(".json", &format!("[{}]", rows.join(",")));
    let columns = ColumnConfig {
        label_column: "label".to_string(),
        confidence_column: "score".to_string(),
        date_column: "date".to_string(),
    };

    let batch = load_batch(file.path(), &columns).unwrap();
    let report = engine().analyze("Acme", &batch, &ctx());
    assert_eq!(report.signal, ReportSignal::Sell);
    assert_eq!(report.sentiment_breakdown.unwrap().negative_count, 6);
}

// =============================================================================
// Article Pipeline
// =============================================================================

#[tokio::test]
async fn keyword_classified_articles_feed_the_engine() {
    let mut articles: Vec<Article> = (0..5)
        .map(|i| {
            Article::new(format!("Acme shares surge on record profits {i}"))
                .with_published_at("2025-01-28T12:00:00Z")
        })
        .collect();
    articles.push(Article::new("Acme holds annual meeting").with_published_at("2025-01-10"));

    let analyzer = ArticleAnalyzer::new(Arc::new(KeywordClassifier::new()), Default::default());
    let batch = analyzer.analyze(&articles).await;
    let report = engine().analyze("Acme", &batch, &ctx());

    assert_eq!(report.signal, ReportSignal::Buy);
    let breakdown = report.sentiment_breakdown.unwrap();
    assert_eq!(breakdown.positive_count, 5);
    assert_eq!(breakdown.neutral_count, 1);
}
