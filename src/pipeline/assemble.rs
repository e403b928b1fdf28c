//! Hint assembly under the question length budget.

use std::collections::VecDeque;

use rand::Rng;
use tracing::debug;

use crate::error::GenerationError;
use crate::pipeline::{MIN_QUESTION_CHARS, TARGET_QUESTION_CHARS};

/// Ordered hints plus the length of their space-joined form.
#[derive(Debug, Clone)]
pub struct HintSet {
  hints: VecDeque<String>,
  chars: usize,
}

impl HintSet {
  fn new() -> Self {
    Self { hints: VecDeque::new(), chars: 0 }
  }

  fn push_back(&mut self, hint: String) {
    self.chars += hint.chars().count();
    self.hints.push_back(hint);
  }

  fn push_front(&mut self, hint: String) {
    self.chars += hint.chars().count();
    self.hints.push_front(hint);
  }

  /// Length of the hints joined by single spaces.
  pub fn joined_len(&self) -> usize {
    self.chars + self.hints.len().saturating_sub(1)
  }

  pub fn into_vec(self) -> Vec<String> {
    self.hints.into()
  }
}

/// Seed with the second sentence and the revealer, then prepend random picks from the
/// remaining sentences until the question is long enough or the pool runs dry.
/// A picked sentence leaves the pool together with every repeat of it.
pub fn assemble_hints<R: Rng>(
  sentences: &[String],
  revealer: String,
  rng: &mut R,
) -> Result<Vec<String>, GenerationError> {
  let second = sentences.get(1).ok_or(GenerationError::InsufficientContent)?;
  let mut set = HintSet::new();
  set.push_back(second.clone());
  set.push_back(revealer);

  let mut pool: Vec<&String> = sentences.iter().skip(2).collect();
  loop {
    let len = set.joined_len();
    if len > TARGET_QUESTION_CHARS {
      break;
    }
    if pool.is_empty() {
      if len < MIN_QUESTION_CHARS {
        debug!(target: "question", len, "Pool exhausted below minimum length");
        return Err(GenerationError::InsufficientContent);
      }
      break;
    }
    let pick = pool[rng.gen_range(0..pool.len())];
    pool.retain(|s| *s != pick);
    set.push_front(pick.clone());
  }

  debug!(target: "question", hints = set.hints.len(), len = set.joined_len(), "Hints assembled");
  Ok(set.into_vec())
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn sentence(tag: usize, len: usize) -> String {
    let head = format!("S{tag} ");
    format!("{head}{}", "x".repeat(len - head.len()))
  }

  #[test]
  fn stops_once_past_target_length() {
    let sentences: Vec<String> = (0..10).map(|i| sentence(i, 150)).collect();
    let mut rng = StdRng::seed_from_u64(7);
    let hints = assemble_hints(&sentences, "REVEAL".into(), &mut rng).unwrap();
    let joined = hints.join(" ").chars().count();
    assert!(joined > TARGET_QUESTION_CHARS);
    assert_eq!(hints.len(), 5);
    assert_eq!(hints[hints.len() - 1], "REVEAL");
    assert_eq!(hints[hints.len() - 2], sentences[1]);
  }

  #[test]
  fn exhausted_pool_above_floor_succeeds() {
    let sentences: Vec<String> = (0..4).map(|i| sentence(i, 120)).collect();
    let mut rng = StdRng::seed_from_u64(1);
    let hints = assemble_hints(&sentences, "REVEAL".into(), &mut rng).unwrap();
    assert_eq!(hints.len(), 4);
    let joined = hints.join(" ").chars().count();
    assert!((MIN_QUESTION_CHARS..=TARGET_QUESTION_CHARS).contains(&joined));
  }

  #[test]
  fn exhausted_pool_below_floor_fails() {
    let sentences: Vec<String> = (0..3).map(|i| sentence(i, 60)).collect();
    let mut rng = StdRng::seed_from_u64(1);
    let got = assemble_hints(&sentences, "REVEAL".into(), &mut rng);
    assert!(matches!(got, Err(GenerationError::InsufficientContent)));
  }

  #[test]
  fn repeated_sentence_is_used_once() {
    let repeated = sentence(9, 80);
    let mut sentences = vec![sentence(0, 60), sentence(1, 60)];
    sentences.extend(std::iter::repeat(repeated.clone()).take(4));
    sentences.push(sentence(2, 120));
    sentences.push(sentence(3, 120));
    for seed in 0..20 {
      let hints = assemble_hints(&sentences, "REVEAL".into(), &mut StdRng::seed_from_u64(seed)).unwrap();
      assert!(hints.iter().filter(|h| **h == repeated).count() <= 1, "seed {seed}: {hints:?}");
    }
  }

  proptest! {
    #[test]
    fn same_seed_same_selection(lens in prop::collection::vec(41usize..199, 2..15), seed in any::<u64>()) {
      let sentences: Vec<String> = lens.iter().enumerate().map(|(i, l)| sentence(i, *l)).collect();
      let a = assemble_hints(&sentences, "REVEAL".into(), &mut StdRng::seed_from_u64(seed));
      let b = assemble_hints(&sentences, "REVEAL".into(), &mut StdRng::seed_from_u64(seed));
      prop_assert_eq!(a.ok(), b.ok());
    }

    #[test]
    fn stops_only_through_defined_exits(lens in prop::collection::vec(41usize..199, 2..15), seed in any::<u64>()) {
      let sentences: Vec<String> = lens.iter().enumerate().map(|(i, l)| sentence(i, *l)).collect();
      match assemble_hints(&sentences, "REVEAL".into(), &mut StdRng::seed_from_u64(seed)) {
        Ok(hints) => {
          let joined = hints.join(" ").chars().count();
          let exhausted = hints.len() == sentences.len();
          prop_assert!(joined > TARGET_QUESTION_CHARS || (exhausted && joined >= MIN_QUESTION_CHARS));
          prop_assert_eq!(hints.last().map(String::as_str), Some("REVEAL"));
        }
        Err(e) => {
          prop_assert!(matches!(e, GenerationError::InsufficientContent));
          let total: usize = sentences.iter().skip(1).map(|s| s.chars().count() + 1).sum::<usize>() + 6;
          prop_assert!(total < MIN_QUESTION_CHARS);
        }
      }
    }
  }
}
