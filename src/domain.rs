//! Domain models: topics, answers and the generated question.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Parenthetical disambiguators, e.g. the " (fruit)" in "Apple (fruit)".
pub(crate) static PARENTHETICAL_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r" *\([^)]*\)").unwrap());

/// Category of a question. Only Geography and People get their own redaction rules;
/// every other corpus category shares the general rules but keeps its label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Topic {
  Geography,
  People,
  Other(String),
}

impl Topic {
  pub fn label(&self) -> &str {
    match self {
      Topic::Geography => "Geography",
      Topic::People => "People",
      Topic::Other(label) => label,
    }
  }
}

impl From<String> for Topic {
  fn from(label: String) -> Self {
    match label.as_str() {
      "Geography" => Topic::Geography,
      "People" => Topic::People,
      _ => Topic::Other(label),
    }
  }
}

impl From<&str> for Topic {
  fn from(label: &str) -> Self { Topic::from(label.to_string()) }
}

impl From<Topic> for String {
  fn from(topic: Topic) -> Self {
    match topic {
      Topic::Other(label) => label,
      t => t.label().to_string(),
    }
  }
}

impl fmt::Display for Topic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// The subject of a question: the article title as found in the corpus and the
/// form shown to players.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Answer {
  pub raw: String,
  pub display: String,
}

impl Answer {
  pub fn new(raw: &str) -> Self {
    Self {
      raw: raw.to_string(),
      display: PARENTHETICAL_RE.replace_all(raw, "").into_owned(),
    }
  }
}

/// A finished question. Hints are ordered most obscure first; the revealer is last.
#[derive(Clone, Debug, Serialize)]
pub struct Question {
  pub topic: Topic,
  pub hints: Vec<String>,
  pub raw_answer: String,
  pub display_answer: String,
}
