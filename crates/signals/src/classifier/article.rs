//! Article classification pipeline.
//!
//! Builds one text per article, runs it through the injected classifier and
//! collects the labels into an [`ObservationBatch`]. [`ArticleAnalyzer::label_articles`]
//! also labels the title and description on their own, producing the same
//! per-field columns a labelled CSV export carries.

use futures_util::future::join_all;
use sentiment_signal_core::{
    parse_timestamp, ClassifierConfig, Classification, ClassifierScores, ColumnConfig,
    ObservationBatch, RecordSet, SentimentClassifier, SentimentObservation, SignalError,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A news article as fetched from a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "publishedAt")]
    pub published_at: Option<String>,
}

impl Article {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            published_at: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = Some(published_at.into());
        self
    }

    /// Title and description joined, trimmed and cut to `max_chars` characters.
    #[must_use]
    pub fn text(&self, max_chars: usize) -> String {
        let joined = format!(
            "{} {}",
            self.title,
            self.description.as_deref().unwrap_or_default()
        );
        joined.trim().chars().take(max_chars).collect()
    }

    fn field_text(&self, field: ArticleField, max_chars: usize) -> String {
        let raw = match field {
            ArticleField::Title => self.title.as_str(),
            ArticleField::Description => self.description.as_deref().unwrap_or_default(),
            ArticleField::Combined => return self.text(max_chars),
        };
        raw.trim().chars().take(max_chars).collect()
    }
}

/// Article text a sentiment column is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArticleField {
    Title,
    Description,
    #[default]
    Combined,
}

impl ArticleField {
    pub const ALL: [ArticleField; 3] = [
        ArticleField::Title,
        ArticleField::Description,
        ArticleField::Combined,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Combined => "combined",
        }
    }

    /// Column names that select this field's labels, keeping the default date column.
    #[must_use]
    pub fn columns(&self) -> ColumnConfig {
        ColumnConfig {
            label_column: format!("{}_sentiment_label", self.as_str()),
            confidence_column: format!("{}_sentiment_confidence", self.as_str()),
            ..ColumnConfig::default()
        }
    }
}

impl fmt::Display for ArticleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleField {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "combined" => Ok(Self::Combined),
            other => Err(SignalError::InvalidConfig(format!(
                "unknown article field '{other}', expected one of: title, description, combined"
            ))),
        }
    }
}

/// Label plus raw scores for one article field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSentiment {
    pub classification: Classification,
    /// Zero for empty text or a failed classification
    pub scores: ClassifierScores,
}

impl FieldSentiment {
    fn neutral() -> Self {
        Self {
            classification: Classification::neutral(),
            scores: ClassifierScores::default(),
        }
    }
}

/// Per-field sentiment of one article.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArticleSentiment {
    pub title: FieldSentiment,
    pub description: FieldSentiment,
    pub combined: FieldSentiment,
}

impl ArticleSentiment {
    #[must_use]
    pub fn field(&self, field: ArticleField) -> &FieldSentiment {
        match field {
            ArticleField::Title => &self.title,
            ArticleField::Description => &self.description,
            ArticleField::Combined => &self.combined,
        }
    }
}

/// Classifies articles with an injected classifier.
#[derive(Clone)]
pub struct ArticleAnalyzer {
    classifier: Arc<dyn SentimentClassifier>,
    config: ClassifierConfig,
}

impl ArticleAnalyzer {
    #[must_use]
    pub fn new(classifier: Arc<dyn SentimentClassifier>, config: ClassifierConfig) -> Self {
        Self { classifier, config }
    }

    /// Classifies one text. Empty text and classifier failures are neutral at 0.0.
    pub async fn classify_text(&self, text: &str) -> Classification {
        self.score_text(text).await.classification
    }

    async fn score_text(&self, text: &str) -> FieldSentiment {
        if text.trim().is_empty() {
            return FieldSentiment::neutral();
        }

        match self.classifier.classify(text).await {
            Ok(scores) => FieldSentiment {
                classification: scores.classify(self.config.label_threshold),
                scores,
            },
            Err(e) => {
                tracing::warn!(
                    classifier = self.classifier.name(),
                    error = %e,
                    "classification failed, treating text as neutral"
                );
                FieldSentiment::neutral()
            }
        }
    }

    /// Classifies the title, description and combined text of every article.
    ///
    /// Output order matches input order.
    pub async fn label_articles(&self, articles: &[Article]) -> Vec<ArticleSentiment> {
        let max_chars = self.config.max_chars;
        join_all(articles.iter().map(|article| async move {
            let title = article.field_text(ArticleField::Title, max_chars);
            let description = article.field_text(ArticleField::Description, max_chars);
            let combined = article.field_text(ArticleField::Combined, max_chars);
            let (title, description, combined) = futures_util::join!(
                self.score_text(&title),
                self.score_text(&description),
                self.score_text(&combined)
            );
            ArticleSentiment {
                title,
                description,
                combined,
            }
        }))
        .await
    }

    /// Labels every article field and lays the results out as a record set.
    ///
    /// Each row keeps `title`, `description` and (when known) `published_at`,
    /// plus `{field}_sentiment_label`, `{field}_sentiment_confidence`,
    /// `{field}_positive_score` and `{field}_negative_score` for the title,
    /// description and combined fields.
    pub async fn label_records(&self, articles: &[Article]) -> RecordSet {
        let sentiments = self.label_articles(articles).await;

        let records = articles
            .iter()
            .zip(&sentiments)
            .map(|(article, sentiment)| {
                let mut row = Map::new();
                row.insert("title".to_string(), json!(article.title));
                row.insert("description".to_string(), json!(article.description));
                if let Some(published_at) = &article.published_at {
                    row.insert("published_at".to_string(), json!(published_at));
                }
                for field in ArticleField::ALL {
                    let value = sentiment.field(field);
                    let prefix = field.as_str();
                    row.insert(
                        format!("{prefix}_sentiment_label"),
                        Value::from(value.classification.label.as_str()),
                    );
                    row.insert(
                        format!("{prefix}_sentiment_confidence"),
                        json!(value.classification.confidence),
                    );
                    row.insert(format!("{prefix}_positive_score"), json!(value.scores.positive));
                    row.insert(format!("{prefix}_negative_score"), json!(value.scores.negative));
                }
                row
            })
            .collect();

        tracing::info!(
            classifier = self.classifier.name(),
            articles = articles.len(),
            "labelled article fields"
        );
        RecordSet::from_records(records)
    }

    /// Labels every article field, then normalizes the columns named by `columns`.
    ///
    /// # Errors
    /// Returns `SignalError::MissingColumn` when `columns` names a label
    /// column the labelled records do not carry.
    pub async fn analyze_with_columns(
        &self,
        articles: &[Article],
        columns: &ColumnConfig,
    ) -> Result<ObservationBatch, SignalError> {
        let records = self.label_records(articles).await;
        ObservationBatch::from_records(&records, columns)
    }

    /// Classifies every article and builds a batch from the results.
    ///
    /// Output order matches input order. The batch carries a date column only
    /// when at least one article has a publication time.
    pub async fn analyze(&self, articles: &[Article]) -> ObservationBatch {
        let classifications = join_all(
            articles
                .iter()
                .map(|article| async move {
                    let text = article.text(self.config.max_chars);
                    self.classify_text(&text).await
                }),
        )
        .await;

        let observations: Vec<SentimentObservation> = articles
            .iter()
            .zip(classifications)
            .map(|(article, classification)| SentimentObservation {
                label: classification.label,
                confidence: Some(classification.confidence),
                published_at: article.published_at.as_deref().and_then(parse_timestamp),
            })
            .collect();

        let any_dated = observations.iter().any(|o| o.published_at.is_some());
        tracing::info!(
            classifier = self.classifier.name(),
            articles = observations.len(),
            "classified articles"
        );

        let batch = ObservationBatch::new(observations);
        if any_dated {
            batch
        } else {
            batch.without_date_column()
        }
    }
}
