//! Text classification: the article pipeline and the built-in lexicon model.

mod article;
mod keyword;

pub use article::{Article, ArticleAnalyzer, ArticleField, ArticleSentiment, FieldSentiment};
pub use keyword::KeywordClassifier;
