//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - One generation attempt: fetch the article, run the pipeline
//!   - Filling a packet slot with bounded retries over random candidates
//!   - Whole-packet generation for a topic filter and difficulty

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, instrument, warn};

use crate::corpus::is_screened_out;
use crate::domain::{Answer, Topic};
use crate::error::{AttemptError, GenerationError};
use crate::pipeline::generate_question;
use crate::protocol::{to_out, QuestionOut};
use crate::state::AppState;

/// Fetch the article for `answer` and turn it into a question.
/// With a `seed`, hint selection is reproducible for the same article text.
#[instrument(level = "info", skip(state), fields(topic = %topic))]
pub async fn attempt_question(
  state: &AppState,
  topic: &Topic,
  answer: &str,
  seed: Option<u64>,
) -> Result<QuestionOut, AttemptError> {
  let title = Answer::new(answer).display;
  let text = state
    .wiki
    .fetch_article_text(&title)
    .await?
    .ok_or_else(|| GenerationError::ArticleNotFound(title.clone()))?;

  let mut rng = match seed {
    Some(s) => StdRng::seed_from_u64(s),
    None => StdRng::from_entropy(),
  };
  let question = generate_question(topic, answer, &text, &mut rng)?;
  info!(target: "question", %answer, hints = question.hints.len(), "Question generated");
  Ok(to_out(&question))
}

/// Try up to `attempts_per_question` random candidates for one question slot.
/// Returns None when every attempt failed; the slot is then skipped.
#[instrument(level = "info", skip_all, fields(candidates = candidates.len()))]
pub async fn fill_slot(
  state: &AppState,
  candidates: &[(Topic, String)],
  seen: &mut HashSet<String>,
) -> Option<QuestionOut> {
  for _ in 0..state.config.packet.attempts_per_question {
    let pick = { candidates.choose(&mut rand::thread_rng()).cloned() };
    let Some((topic, answer)) = pick else {
      return None;
    };
    if !seen.insert(answer.clone()) {
      continue;
    }
    if is_screened_out(&answer) {
      debug!(target: "question", %answer, "Skipping screened answer");
      continue;
    }
    match attempt_question(state, &topic, &answer, None).await {
      Ok(q) => return Some(q),
      Err(e) => {
        warn!(target: "question", %topic, %answer, kind = e.kind(), error = %e, "Attempt failed");
      }
    }
  }
  None
}

/// Generate up to `count` questions; failed slots are silently dropped.
#[instrument(level = "info", skip(state, seen))]
pub async fn generate_packet(
  state: &AppState,
  topic: Option<&str>,
  difficulty: usize,
  count: usize,
  seen: &mut HashSet<String>,
) -> Vec<QuestionOut> {
  let candidates = state.corpus.candidates(difficulty, topic);
  if candidates.is_empty() {
    warn!(target: "question", ?topic, difficulty, "No candidates for packet");
    return Vec::new();
  }

  let mut questions = Vec::with_capacity(count);
  for _ in 0..count {
    if let Some(q) = fill_slot(state, &candidates, seen).await {
      questions.push(q);
    }
  }
  info!(target: "question", requested = count, generated = questions.len(), "Packet generated");
  questions
}
