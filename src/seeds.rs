//! Built-in seed corpus so the server is useful before a crawl has been run.

use std::collections::BTreeMap;

use crate::corpus::Corpus;

/// A handful of level-1 vital articles per topic. Other levels stay empty.
pub fn seed_corpus() -> Corpus {
  let level1: BTreeMap<String, Vec<String>> = [
    ("Geography", &["Africa", "Amazon River", "Himalayas", "Mediterranean Sea", "Sahara"][..]),
    ("People", &["Albert Einstein", "Cleopatra", "Johann Sebastian Bach", "Leonardo da Vinci", "William Shakespeare"][..]),
    ("Arts", &["Architecture", "Opera", "Painting", "Sculpture"][..]),
    ("Physical sciences", &["Atom", "Electricity", "Gravity", "Volcano"][..]),
    ("Technology", &["Bridge", "Computer", "Printing press", "Wheel"][..]),
  ]
  .into_iter()
  .map(|(topic, answers)| (topic.to_string(), answers.iter().map(|a| a.to_string()).collect()))
  .collect();
  Corpus::new(vec![level1])
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::corpus::is_screened_out;

  #[test]
  fn seed_answers_survive_screening() {
    let corpus = seed_corpus();
    let candidates = corpus.candidates(1, None);
    assert!(!candidates.is_empty());
    assert!(candidates.iter().all(|(_, a)| !is_screened_out(a)));
    assert!(corpus.topics(1).contains(&"People".to_string()));
  }
}
