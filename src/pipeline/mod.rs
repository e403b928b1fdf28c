//! Article -> question pipeline.
//!
//! Flow:
//! 1) Screen the raw article (empty, disambiguation, taxonomy).
//! 2) Normalize, segment and drop structurally broken sentences.
//! 3) Derive alternate answers and redact them everywhere.
//! 4) Keep sentences that make good standalone hints.
//! 5) Build the revealer from the lead sentence and assemble hints under the budget.
//!
//! Every stage is a pure function over owned sentence vectors. The only source of
//! nondeterminism is the injected random generator.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument};

use crate::domain::{Answer, Question, Topic};
use crate::error::GenerationError;

pub mod assemble;
pub mod filter;
pub mod format;
pub mod normalize;
pub mod redact;
pub mod reveal;
pub mod segment;
pub mod topic;

/// Hint sentences must be strictly longer than this...
pub const MIN_SENTENCE_CHARS: usize = 40;
/// ...and strictly shorter than this.
pub const MAX_SENTENCE_CHARS: usize = 200;
/// A question whose pool runs out below this length is rejected.
pub const MIN_QUESTION_CHARS: usize = 350;
/// Assembly stops as soon as the question is longer than this.
pub const TARGET_QUESTION_CHARS: usize = 550;

pub const LEAD_IN: &str = "For 10 points: ";
pub const MARKER_OPEN: &str = "<em>";
pub const MARKER_CLOSE: &str = "</em>";

static TAXONOMY_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"is a (?:phylum|class|order|family|genus|species)").unwrap());

pub fn emphasize(word: &str) -> String {
  format!("{MARKER_OPEN}{word}{MARKER_CLOSE}")
}

/// Reject articles that can never make a question.
pub fn screen_article(answer: &Answer, text: &str) -> Result<(), GenerationError> {
  if text.trim().is_empty() {
    return Err(GenerationError::ArticleNotFound(answer.display.clone()));
  }
  let opening: String = text.chars().take(100).collect();
  if opening.contains(" may refer to") {
    return Err(GenerationError::DisambiguationPage);
  }
  if TAXONOMY_RE.is_match(text) {
    return Err(GenerationError::TaxonomicName);
  }
  Ok(())
}

/// Turn one article into a question, or explain why it can't be done.
#[instrument(level = "debug", skip(article, rng), fields(topic = %topic, answer = %raw_answer))]
pub fn generate_question<R: Rng>(
  topic: &Topic,
  raw_answer: &str,
  article: &str,
  rng: &mut R,
) -> Result<Question, GenerationError> {
  let answer = Answer::new(raw_answer);
  screen_article(&answer, article)?;

  let text = normalize::normalize_article(article);
  let sentences = filter::filter_valid(segment::segment_sentences(&text))?;

  let alternates = topic::derive_alternates(topic, &answer.display);
  debug!(target: "question", ?alternates, "Alternates");

  let replacements = redact::build_replacements(topic, &alternates, &text)?;
  let redacted = redact::redact_all(sentences, &replacements);
  let survivors = filter::filter_quality(redacted, &alternates)?;
  debug!(target: "question", sentences = ?survivors, "Sentences");

  let revealer = reveal::build_revealer(topic, &survivors[0])?;
  if filter::leaks_answer(&revealer, &alternates) {
    debug!(target: "question", %revealer, "Revealer still names the answer");
    return Err(GenerationError::InsufficientContent);
  }
  let hints = assemble::assemble_hints(&survivors, revealer, rng)?;

  Ok(Question {
    topic: topic.clone(),
    hints,
    raw_answer: answer.raw,
    display_answer: answer.display,
  })
}
