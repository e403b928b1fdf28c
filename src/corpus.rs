//! Candidate answers by difficulty level and topic, plus the crawl that builds them.
//!
//! On disk the corpus is the JSON array written by `crawl`: one object per level
//! (index 0 = level 1), each mapping a topic label to a sorted list of article titles.

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{info, instrument, warn};

use crate::domain::Topic;
use crate::error::CorpusError;
use crate::wiki::WikiClient;

pub const LEVELS: usize = 5;
const SUBCATEGORY_NS: i64 = 14;
const TOPIC_SEPARATOR: &str = " vital articles in ";

/// Answers that rarely make good questions: very long titles, year-specific events,
/// listing articles and taxonomic families.
static SCREENED_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r".{30,}|\b(?:1\d|20)\d\d\b|^(?:Cinema|History) of |^[A-Z][a-z]{4,}ae$").unwrap()
});

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Corpus {
  levels: Vec<BTreeMap<String, Vec<String>>>,
}

impl Corpus {
  pub fn new(levels: Vec<BTreeMap<String, Vec<String>>>) -> Self {
    Self { levels }
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
  }

  pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CorpusError> {
    std::fs::write(path, serde_json::to_string(self)?)?;
    Ok(())
  }

  pub fn level_count(&self) -> usize {
    self.levels.len()
  }

  fn level(&self, difficulty: usize) -> Option<&BTreeMap<String, Vec<String>>> {
    difficulty.checked_sub(1).and_then(|i| self.levels.get(i))
  }

  /// Topic labels available at `difficulty` (1-based).
  pub fn topics(&self, difficulty: usize) -> Vec<String> {
    self.level(difficulty).map(|l| l.keys().cloned().collect()).unwrap_or_default()
  }

  /// Every (topic, answer) pair at `difficulty`; `None` or "All" selects every topic.
  pub fn candidates(&self, difficulty: usize, topic_filter: Option<&str>) -> Vec<(Topic, String)> {
    let Some(level) = self.level(difficulty) else {
      return Vec::new();
    };
    let wanted = |topic: &str| match topic_filter {
      None | Some("All") => true,
      Some(t) => t == topic,
    };
    level
      .iter()
      .filter(|(topic, _)| wanted(topic.as_str()))
      .flat_map(|(topic, answers)| answers.iter().map(move |a| (Topic::from(topic.as_str()), a.clone())))
      .collect()
  }
}

/// True for answers the packet generator should not even try.
pub fn is_screened_out(answer: &str) -> bool {
  SCREENED_RE.is_match(answer)
}

/// Build the corpus from the "level-N vital articles by topic" category trees.
#[instrument(level = "info", skip(wiki))]
pub async fn crawl(wiki: &WikiClient) -> Result<Corpus, CorpusError> {
  let mut levels = Vec::with_capacity(LEVELS);
  for level in 1..=LEVELS {
    let root = format!("Category:Wikipedia_level-{level}_vital_articles_by_topic");
    let mut topics = BTreeMap::new();
    for member in wiki.category_members(&root).await? {
      if member.ns != SUBCATEGORY_NS {
        continue;
      }
      let Some(topic) = topic_label(&member.title) else {
        warn!(target: "tossup_backend", title = %member.title, "Unexpected subcategory name; skipping");
        continue;
      };
      let titles = wiki.category_members(&member.title).await?;
      let answers = article_titles(titles.into_iter().map(|m| m.title));
      info!(target: "tossup_backend", level, %topic, answers = answers.len(), "Crawled topic");
      topics.insert(topic, answers);
    }
    levels.push(topics);
  }
  Ok(Corpus::new(levels))
}

fn topic_label(category_title: &str) -> Option<String> {
  category_title.split_once(TOPIC_SEPARATOR).map(|(_, t)| t.to_string())
}

fn article_titles(titles: impl Iterator<Item = String>) -> Vec<String> {
  let mut out: Vec<String> = titles
    .map(|t| t.strip_prefix("Talk:").map(str::to_string).unwrap_or(t))
    .collect();
  out.sort();
  out
}
