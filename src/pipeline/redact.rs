//! Answer redaction: every alternate, in every sentence, becomes a placeholder.

use crate::domain::Topic;
use crate::pipeline::topic::Replacement;

/// Compile the substitutions for all alternates, alternate by alternate.
pub fn build_replacements(
  topic: &Topic,
  alternates: &[String],
  source_text: &str,
) -> Result<Vec<Replacement>, regex::Error> {
  let rules = topic.rules();
  let mut all = Vec::new();
  for alternate in alternates {
    all.extend(rules.replacements(alternate, source_text)?);
  }
  Ok(all)
}

pub fn redact_sentence(sentence: &str, replacements: &[Replacement]) -> String {
  replacements.iter().fold(sentence.to_string(), |acc, r| {
    r.pattern.replace_all(&acc, regex::NoExpand(&r.placeholder)).into_owned()
  })
}

pub fn redact_all(sentences: Vec<String>, replacements: &[Replacement]) -> Vec<String> {
  sentences.iter().map(|s| redact_sentence(s, replacements)).collect()
}
