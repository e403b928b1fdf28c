//! Topic-specific behaviour: alternate answers, redaction rules and revealer shaping.
//!
//! Each topic maps to one `TopicRules` implementation; shared stages only ever talk
//! to the trait.

use regex::Regex;

use crate::domain::Topic;
use crate::error::GenerationError;
use crate::pipeline::emphasize;

/// One compiled substitution applied to every sentence.
#[derive(Debug, Clone)]
pub struct Replacement {
  pub pattern: Regex,
  pub placeholder: String,
}

impl Replacement {
  fn new(pattern: &str, word: &str) -> Result<Self, regex::Error> {
    Ok(Self { pattern: Regex::new(&format!("(?i){pattern}"))?, placeholder: emphasize(word) })
  }
}

pub trait TopicRules: Send + Sync {
  /// Extra spellings of the answer that must be redacted too.
  fn derived_alternate(&self, _display: &str) -> Option<String> {
    None
  }

  /// Substitutions that mask `alternate`, in application order.
  fn replacements(&self, alternate: &str, source_text: &str) -> Result<Vec<Replacement>, regex::Error>;

  /// Reshape the alias-free lead sentence into the body of the revealer.
  fn reveal(&self, lead: &str) -> Result<String, GenerationError> {
    Ok(lead.to_string())
  }
}

pub struct GeographyRules;
pub struct PeopleRules;
pub struct GeneralRules;

impl Topic {
  pub fn rules(&self) -> &'static dyn TopicRules {
    match self {
      Topic::Geography => &GeographyRules,
      Topic::People => &PeopleRules,
      Topic::Other(_) => &GeneralRules,
    }
  }
}

/// Display answer first, then whatever the topic derives from it.
pub fn derive_alternates(topic: &Topic, display: &str) -> Vec<String> {
  let mut alternates = vec![display.to_string()];
  alternates.extend(topic.rules().derived_alternate(display));
  alternates
}

impl TopicRules for GeographyRules {
  fn replacements(&self, alternate: &str, _source_text: &str) -> Result<Vec<Replacement>, regex::Error> {
    let a = regex::escape(alternate);
    Ok(vec![Replacement::new(&format!(r"\b(?:the )?{a}\b"), "this place")?])
  }
}

impl TopicRules for PeopleRules {
  fn derived_alternate(&self, display: &str) -> Option<String> {
    match display.split_once(" of ") {
      Some((name, _)) => Some(name.to_string()),
      None => display.split(' ').last().map(str::to_string),
    }
  }

  fn replacements(&self, alternate: &str, _source_text: &str) -> Result<Vec<Replacement>, regex::Error> {
    let a = regex::escape(alternate);
    Ok(vec![Replacement::new(&format!(r"\b{a}\b"), "this person")?])
  }

  fn reveal(&self, lead: &str) -> Result<String, GenerationError> {
    let at = [" is", " was"]
      .iter()
      .filter_map(|sep| lead.find(sep))
      .min()
      .ok_or(GenerationError::NoBiographicalPredicate)?;
    let predicate = &lead[at + 1..];
    Ok(format!("{} {predicate}", emphasize("this person")))
  }
}

impl TopicRules for GeneralRules {
  fn replacements(&self, alternate: &str, source_text: &str) -> Result<Vec<Replacement>, regex::Error> {
    let a = regex::escape(alternate);
    if looks_plural(alternate, source_text)? {
      return Ok(vec![Replacement::new(&format!(r"\b(?:the )?{a}\b"), "these")?]);
    }

    let plural = match alternate.strip_suffix('y') {
      Some(root) => Replacement::new(&format!(r"\b(?:the )?{}ies\b", regex::escape(root)), "these")?,
      None => Replacement::new(&format!(r"\b(?:(?:an?|the) )?{a}s\b"), "these")?,
    };
    let singular = Replacement::new(&format!(r"\b(?:(?:an?|the) )?{a}\b"), "this")?;
    Ok(vec![plural, singular])
  }
}

/// An answer ending in "s" (but not "-ics") reads as plural when the article also uses
/// its last word without the final one or two letters. A last word of two letters or
/// fewer leaves an empty stem, which matches any text.
fn looks_plural(answer: &str, source_text: &str) -> Result<bool, regex::Error> {
  if !answer.ends_with('s') || answer.ends_with("ics") {
    return Ok(false);
  }
  let last_word: Vec<char> = answer.split(' ').last().unwrap_or(answer).chars().collect();
  if last_word.len() <= 2 {
    return Ok(true);
  }
  let stems: Vec<String> = [2, 1]
    .iter()
    .map(|&cut| regex::escape(&last_word[..last_word.len() - cut].iter().collect::<String>()))
    .collect();
  let near_singular = Regex::new(&format!(r"(?i)\b(?:{})\b", stems.join("|")))?;
  Ok(near_singular.is_match(source_text))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn people_derive_surname_or_regnal_name() {
    assert_eq!(derive_alternates(&Topic::People, "Albert Einstein"), vec!["Albert Einstein", "Einstein"]);
    assert_eq!(derive_alternates(&Topic::People, "Catherine of Aragon"), vec!["Catherine of Aragon", "Catherine"]);
    assert_eq!(derive_alternates(&Topic::People, "Plato"), vec!["Plato", "Plato"]);
  }

  #[test]
  fn other_topics_have_a_single_alternate() {
    assert_eq!(derive_alternates(&Topic::Geography, "New York City"), vec!["New York City"]);
    assert_eq!(derive_alternates(&Topic::Other("Arts".into()), "Opera"), vec!["Opera"]);
  }

  #[test]
  fn plurality_needs_a_near_singular_in_the_text() {
    assert!(looks_plural("Cats", "The domestic cat is small.").unwrap());
    assert!(!looks_plural("Cats", "Felines are small.").unwrap());
    assert!(!looks_plural("Physics", "Physic was an old word.").unwrap());
    assert!(!looks_plural("Bridge", "A bridge.").unwrap());
    assert!(looks_plural("Black holes", "A black hole forms.").unwrap());
  }

  #[test]
  fn very_short_answers_ending_in_s_are_plural() {
    assert!(looks_plural("Os", "Osmium is dense.").unwrap());
    assert!(looks_plural("s", "Nothing related.").unwrap());
    let reps = GeneralRules.replacements("Os", "Os is dense.").unwrap();
    let out = reps.iter().fold("Os is dense.".to_string(), |acc, r| {
      r.pattern.replace_all(&acc, regex::NoExpand(&r.placeholder)).into_owned()
    });
    assert_eq!(out, "<em>these</em> is dense.");
  }

  #[test]
  fn people_revealer_keeps_predicate() {
    let got = PeopleRules.reveal("<em>this person</em> was a physicist.").unwrap();
    assert_eq!(got, "<em>this person</em> was a physicist.");
    let got = PeopleRules.reveal("Sir <em>this person</em>, born 1643, is known for gravity.").unwrap();
    assert_eq!(got, "<em>this person</em> is known for gravity.");
    assert!(matches!(
      PeopleRules.reveal("<em>this person</em>: physicist."),
      Err(GenerationError::NoBiographicalPredicate)
    ));
  }
}
