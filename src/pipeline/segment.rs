//! Sentence segmentation and per-sentence cleanup.

use regex::Regex;
use std::sync::LazyLock;

static LIST_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+: ").unwrap());

/// Split normalized text into cleaned candidate sentences.
pub fn segment_sentences(text: &str) -> Vec<String> {
  split_sentences(text).into_iter().map(clean_sentence).collect()
}

fn split_sentences(text: &str) -> Vec<&str> {
  let chars: Vec<(usize, char)> = text.char_indices().collect();
  let mut chunks = Vec::new();
  let mut chunk_start = 0;
  let mut i = 0;

  while i < chars.len() {
    let (_, c) = chars[i];
    if !matches!(c, '.' | '?' | '!') || is_abbreviation(&chars, i) {
      i += 1;
      continue;
    }

    let ws_start = i + 1;
    let mut ws_end = ws_start;
    while ws_end < chars.len() && chars[ws_end].1.is_whitespace() {
      ws_end += 1;
    }
    let run = ws_end - ws_start;
    let next_is_lower = chars.get(ws_end).map_or(true, |(_, n)| n.is_ascii_lowercase());

    // The boundary either swallows the whole whitespace run, or, when lowercase text
    // (or nothing) follows, all but its last character.
    let boundary_end = if run == 0 {
      None
    } else if !next_is_lower {
      Some(ws_end)
    } else if run >= 2 {
      Some(ws_end - 1)
    } else {
      None
    };

    match boundary_end {
      Some(end) => {
        let cut = chars[ws_start].0;
        chunks.push(&text[chunk_start..cut]);
        chunk_start = chars[end].0;
        i = end;
      }
      None => i += 1,
    }
  }

  chunks.push(&text[chunk_start..]);
  chunks
}

/// " U." or " St." style abbreviations never end a sentence.
fn is_abbreviation(chars: &[(usize, char)], punct: usize) -> bool {
  let before = |back: usize| punct.checked_sub(back).map(|j| chars[j].1);
  let upper_then_space = |at: usize| {
    before(at).is_some_and(|c| c.is_ascii_uppercase()) && before(at + 1) == Some(' ')
  };
  upper_then_space(1) || (before(1).is_some_and(|c| c.is_ascii_lowercase()) && upper_then_space(2))
}

fn clean_sentence(chunk: &str) -> String {
  let last_line = chunk.rsplit('\n').next().unwrap_or(chunk);
  LIST_PREFIX_RE.replace(last_line, "").trim().to_string()
}
