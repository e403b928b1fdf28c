//! Presentation: cosmetic hint fixes and the final question markup.

use reqwest::Url;

use crate::domain::Question;

const ARTICLE_BASE_URL: &str = "https://en.wikipedia.org/wiki/";

/// Capitalize a leading placeholder and drop dangling "also"s.
pub fn polish_hint(hint: &str) -> String {
  let capitalized = match hint.strip_prefix("<em>t") {
    Some(rest) => format!("<em>T{rest}"),
    None => hint.to_string(),
  };
  capitalized.replace(" also", "")
}

/// Link to the source article, using the raw corpus title.
pub fn answer_link(raw_answer: &str) -> String {
  let title = raw_answer.replace(' ', "_");
  let mut url = match Url::parse(ARTICLE_BASE_URL) {
    Ok(url) => url,
    Err(_) => return format!("{ARTICLE_BASE_URL}{title}"),
  };
  if let Ok(mut segments) = url.path_segments_mut() {
    segments.pop_if_empty().push(&title);
  }
  url.to_string()
}

pub fn render_html(question: &Question) -> String {
  let body = question
    .hints
    .iter()
    .map(|h| polish_hint(h))
    .collect::<Vec<_>>()
    .join(" ")
    .replace('\n', "<br>");
  format!(
    "<strong>{}</strong><br><br>{}<br><br><strong>Answer:</strong> <a href=\"{}\" target=\"_blank\">{}</a>",
    question.topic.label(),
    body,
    answer_link(&question.raw_answer),
    question.display_answer,
  )
}
