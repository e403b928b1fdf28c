//! Article normalization: drop trailing boilerplate sections, inline section headings
//! and parenthetical asides.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::PARENTHETICAL_RE;

static TRAILING_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\b(?:Gallery|External links|Notes|References|See also|Selected works|Works)\b").unwrap()
});

pub fn normalize_article(text: &str) -> String {
  let body = match TRAILING_SECTION_RE.find(text) {
    Some(m) => &text[..m.start()],
    None => text,
  };
  let without_headings = strip_inline_headings(body);
  PARENTHETICAL_RE.replace_all(&without_headings, "").into_owned()
}

/// A heading is a short capitalized line sitting right after a blank line, not ending
/// like a sentence, and followed by a blank line or a capitalized line.
fn strip_inline_headings(text: &str) -> String {
  let lines: Vec<&str> = text.split('\n').collect();
  let kept: Vec<&str> = lines
    .iter()
    .enumerate()
    .filter(|(i, _)| !is_heading(&lines, *i))
    .map(|(_, line)| *line)
    .collect();
  kept.join("\n")
}

fn is_heading(lines: &[&str], i: usize) -> bool {
  if i < 2 || !lines[i - 1].is_empty() {
    return false;
  }
  let line = lines[i];
  let starts_upper = line.chars().next().is_some_and(|c| c.is_ascii_uppercase());
  if !starts_upper || line.ends_with('.') || line.chars().count() < 3 {
    return false;
  }
  match lines.get(i + 1) {
    Some(next) => next.is_empty() || next.chars().next().is_some_and(|c| c.is_ascii_uppercase()),
    None => false,
  }
}
