//! Error types for question generation, article fetching and corpus handling.
//!
//! Every generation failure is an expected outcome for a given (topic, answer) pair:
//! the caller drops that answer and tries another one.

use thiserror::Error;

/// Why a single (topic, answer) attempt produced no question.
#[derive(Error, Debug)]
pub enum GenerationError {
  #[error("no article text found for {0}")]
  ArticleNotFound(String),

  #[error("found disambiguation page")]
  DisambiguationPage,

  #[error("found taxonomic name")]
  TaxonomicName,

  #[error("first sentence is invalid")]
  InvalidLeadSentence,

  #[error("not enough content")]
  InsufficientContent,

  #[error("no biographical predicate in lead sentence")]
  NoBiographicalPredicate,

  #[error("redaction pattern error: {0}")]
  Pattern(#[from] regex::Error),
}

impl GenerationError {
  /// Stable snake_case identifier used on the wire.
  pub fn kind(&self) -> &'static str {
    match self {
      GenerationError::ArticleNotFound(_) => "article_not_found",
      GenerationError::DisambiguationPage => "disambiguation_page",
      GenerationError::TaxonomicName => "taxonomic_name",
      GenerationError::InvalidLeadSentence => "invalid_lead_sentence",
      GenerationError::InsufficientContent => "insufficient_content",
      GenerationError::NoBiographicalPredicate => "no_biographical_predicate",
      GenerationError::Pattern(_) => "pattern",
    }
  }
}

/// Failures talking to the Wikipedia API.
#[derive(Error, Debug)]
pub enum FetchError {
  #[error("HTTP error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("Wikipedia HTTP {status}: {body}")]
  Status { status: u16, body: String },

  #[error("malformed Wikipedia response: {0}")]
  Malformed(String),
}

/// Anything that can end one generation attempt.
#[derive(Error, Debug)]
pub enum AttemptError {
  #[error(transparent)]
  Fetch(#[from] FetchError),

  #[error(transparent)]
  Generation(#[from] GenerationError),
}

impl AttemptError {
  pub fn kind(&self) -> &'static str {
    match self {
      AttemptError::Fetch(_) => "fetch",
      AttemptError::Generation(e) => e.kind(),
    }
  }
}

#[derive(Error, Debug)]
pub enum CorpusError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("corpus JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("crawl failed: {0}")]
  Fetch(#[from] FetchError),
}
