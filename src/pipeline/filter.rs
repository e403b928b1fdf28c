//! Sentence gates: structural validity before redaction, content quality after it.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::GenerationError;
use crate::pipeline::{MARKER_OPEN, MAX_SENTENCE_CHARS, MIN_SENTENCE_CHARS};

static BROKEN_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[a-z]|\{\{|cite book|diagram|displaystyle").unwrap());

static SPOILER_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)plural|pronounce|pronunciation").unwrap());

/// A placeholder spliced against a proper noun, a hyphen or a slash.
static SPLICE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]{2,} <|[-/]<|>[-/]|> [A-Z]").unwrap());

static LEADING_CONNECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"(?i)^(?:so|though|both|\w+ contrast|overall|then|he|she|they|these|those|that|this|it|later|such|this section|now|for example)\b",
  )
  .unwrap()
});

static INNER_CONNECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)(?:subsequently|same|another|furthermore|similarly|such|therefore|however|thus)\b")
    .unwrap()
});

/// Drop structurally broken sentences. A broken first sentence sinks the attempt.
pub fn filter_valid(sentences: Vec<String>) -> Result<Vec<String>, GenerationError> {
  if let Some(first) = sentences.first() {
    if BROKEN_RE.is_match(first) {
      debug!(target: "question", sentence = %first, "Lead sentence is broken");
      return Err(GenerationError::InvalidLeadSentence);
    }
  }
  Ok(sentences.into_iter().filter(|s| !BROKEN_RE.is_match(s)).collect())
}

/// Keep the lead sentence plus every later sentence that makes a self-contained,
/// properly redacted hint.
pub fn filter_quality(sentences: Vec<String>, alternates: &[String]) -> Result<Vec<String>, GenerationError> {
  let fragments: Vec<String> = alternates.iter().map(|a| answer_fragment(a)).collect();
  let kept: Vec<String> = sentences
    .into_iter()
    .enumerate()
    .filter(|(i, s)| *i == 0 || is_good_hint(s, &fragments))
    .map(|(_, s)| s)
    .collect();

  debug!(target: "question", kept = kept.len(), "Sentences after quality filter");
  if kept.len() < 2 {
    return Err(GenerationError::InsufficientContent);
  }
  Ok(kept)
}

/// First four characters of an alternate, lowercased, without a leading "the ".
/// True when `text` still carries the leading characters of any alternate.
pub fn leaks_answer(text: &str, alternates: &[String]) -> bool {
  let lower = text.to_lowercase();
  alternates.iter().any(|a| lower.contains(answer_fragment(a).as_str()))
}

fn answer_fragment(alternate: &str) -> String {
  let lower = alternate.to_lowercase();
  let stripped = lower.strip_prefix("the ").unwrap_or(&lower);
  stripped.chars().take(4).collect()
}

fn is_good_hint(sentence: &str, fragments: &[String]) -> bool {
  let len = sentence.chars().count();
  let lower = sentence.to_lowercase();
  len > MIN_SENTENCE_CHARS
    && len < MAX_SENTENCE_CHARS
    && sentence.contains(MARKER_OPEN)
    && !SPOILER_RE.is_match(sentence)
    && !SPLICE_RE.is_match(sentence)
    && !fragments.iter().any(|f| lower.contains(f.as_str()))
    && !has_orphan_reference(sentence)
}

fn has_orphan_reference(sentence: &str) -> bool {
  let free = |end: usize| !sentence[end..].starts_with('<');
  LEADING_CONNECTIVE_RE.find(sentence).is_some_and(|m| free(m.end()))
    || INNER_CONNECTIVE_RE.find_iter(sentence).any(|m| free(m.end()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn alts(a: &[&str]) -> Vec<String> {
    a.iter().map(|s| s.to_string()).collect()
  }

  const LEAD: &str = "<em>this place</em> is the capital of a large European country.";

  fn survivors(candidate: &str, alternates: &[&str]) -> usize {
    let s = vec![LEAD.to_string(), candidate.to_string()];
    filter_quality(s, &alts(alternates)).map(|v| v.len()).unwrap_or(1)
  }

  #[test]
  fn invalid_lead_sentence_aborts() {
    let s = vec!["displaystyle x".to_string(), "Fine sentence.".to_string()];
    assert!(matches!(filter_valid(s), Err(GenerationError::InvalidLeadSentence)));
    let s = vec!["lowercase start.".to_string()];
    assert!(matches!(filter_valid(s), Err(GenerationError::InvalidLeadSentence)));
  }

  #[test]
  fn later_broken_sentences_are_dropped() {
    let s = vec![
      "Fine lead.".to_string(),
      "and a continuation.".to_string(),
      "See {{cite book}} here.".to_string(),
      "A diagram shows it.".to_string(),
      "Another fine one.".to_string(),
    ];
    assert_eq!(filter_valid(s).unwrap(), vec!["Fine lead.", "Another fine one."]);
  }

  #[test]
  fn keeps_a_clean_redacted_sentence() {
    let s = "The river that runs through <em>this place</em> is crossed by many old bridges.";
    assert_eq!(survivors(s, &["Paris"]), 2);
  }

  #[test]
  fn rejects_length_and_missing_marker() {
    assert_eq!(survivors("<em>this place</em> is small.", &["Paris"]), 1);
    let long = format!("<em>this place</em> {}", "word ".repeat(40));
    assert_eq!(survivors(&long, &["Paris"]), 1);
    assert_eq!(survivors("The river runs through the city and is crossed by bridges.", &["Paris"]), 1);
  }

  #[test]
  fn rejects_spoilers_and_splices() {
    assert_eq!(survivors("The name of <em>this place</em> is pronounced with a silent final letter.", &["Paris"]), 1);
    assert_eq!(survivors("The famous Greater <em>this place</em> region is home to many millions.", &["Paris"]), 1);
    assert_eq!(survivors("The river that runs through <em>this place</em>-based industries is long.", &["Paris"]), 1);
    assert_eq!(survivors("The river that runs through <em>this place</em> Seine is long and slow.", &["Paris"]), 1);
  }

  #[test]
  fn rejects_leftover_answer_fragments() {
    assert_eq!(survivors("Residents of <em>this place</em> are called Parisians by most people.", &["Paris"]), 1);
    let s = "The stadium near <em>this place</em> hosts matches of a famous football team.";
    assert_eq!(survivors(s, &["The Stadium"]), 1);
  }

  #[test]
  fn rejects_orphaned_references() {
    assert_eq!(survivors("It is known that <em>this place</em> grew rapidly in the middle ages.", &["Paris"]), 1);
    assert_eq!(survivors("In contrast, <em>this place</em> grew rapidly in the middle ages overall.", &["Paris"]), 1);
    assert_eq!(survivors("The city of <em>this place</em>, however, grew rapidly in the middle ages.", &["Paris"]), 1);
    assert_eq!(survivors("Itself a city, <em>this place</em> grew rapidly during the middle ages.", &["Paris"]), 2);
  }

  #[test]
  fn too_few_survivors_is_insufficient() {
    let s = vec![LEAD.to_string()];
    assert!(matches!(filter_quality(s, &alts(&["Paris"])), Err(GenerationError::InsufficientContent)));
  }
}
