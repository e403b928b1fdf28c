//! Builds the revealer: the final, most explicit hint, taken from the lead sentence.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::Topic;
use crate::error::GenerationError;
use crate::pipeline::LEAD_IN;

/// An alias clause right after the placeholder, up to the copula.
static ALIAS_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r">[^<>]*(?: or .+?|, (?:also|commonly|known as|officially|sometimes|spelled) .+?,)( (?:is|are|was|were) )",
  )
  .unwrap()
});

pub fn build_revealer(topic: &Topic, lead: &str) -> Result<String, GenerationError> {
  let without_alias = ALIAS_RE.replace(lead, ">$1");
  let body = topic.rules().reveal(&without_alias)?;
  Ok(format!("{LEAD_IN}{}", lowercase_first(&body)))
}

fn lowercase_first(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_lowercase().chain(chars).collect(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn collapses_alias_clause() {
    let lead = "<em>this place</em>, officially the City of Light, is the capital of France.";
    let got = build_revealer(&Topic::Geography, lead).unwrap();
    assert_eq!(got, "For 10 points: <em>this place</em> is the capital of France.");

    let lead = "<em>these</em> or felines are small carnivorous mammals.";
    let got = build_revealer(&Topic::Other("Biology".into()), lead).unwrap();
    assert_eq!(got, "For 10 points: <em>these</em> are small carnivorous mammals.");
  }

  #[test]
  fn lowercases_first_character() {
    let got = build_revealer(&Topic::Other("Arts".into()), "The art form of <em>this</em> began in Italy.").unwrap();
    assert_eq!(got, "For 10 points: the art form of <em>this</em> began in Italy.");
  }

  #[test]
  fn people_rebuild_around_predicate() {
    let lead = "Sir <em>this person</em> was an English mathematician.";
    let got = build_revealer(&Topic::People, lead).unwrap();
    assert_eq!(got, "For 10 points: <em>this person</em> was an English mathematician.");
    assert!(matches!(
      build_revealer(&Topic::People, "<em>this person</em>, English mathematician."),
      Err(GenerationError::NoBiographicalPredicate)
    ));
  }
}
