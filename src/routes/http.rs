//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument, warn};

use crate::domain::Topic;
use crate::error::AttemptError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_topics(
  State(state): State<Arc<AppState>>,
  Query(q): Query<TopicsQuery>,
) -> impl IntoResponse {
  let difficulty = state.difficulty(q.difficulty);
  Json(TopicsOut { difficulty, topics: state.corpus.topics(difficulty) })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_packet(
  State(state): State<Arc<AppState>>,
  Query(q): Query<PacketQuery>,
) -> impl IntoResponse {
  let difficulty = state.difficulty(q.difficulty);
  let count = state.packet_count(q.count);
  let mut seen = HashSet::new();
  let questions = generate_packet(&state, q.topic.as_deref(), difficulty, count, &mut seen).await;
  info!(target: "question", difficulty, requested = count, generated = questions.len(), "HTTP packet served");
  Json(PacketOut { requested: count, questions })
}

#[instrument(level = "info", skip(state, body), fields(topic = %body.topic, answer = %body.answer))]
pub async fn http_post_question(
  State(state): State<Arc<AppState>>,
  Json(body): Json<QuestionIn>,
) -> impl IntoResponse {
  let topic = Topic::from(body.topic);
  match attempt_question(&state, &topic, &body.answer, body.seed).await {
    Ok(q) => {
      info!(target: "question", id = %q.id, "HTTP question served");
      (StatusCode::OK, Json(q)).into_response()
    }
    Err(e) => {
      warn!(target: "question", kind = e.kind(), error = %e, "HTTP question failed");
      let status = match &e {
        AttemptError::Fetch(_) => StatusCode::BAD_GATEWAY,
        AttemptError::Generation(_) => StatusCode::UNPROCESSABLE_ENTITY,
      };
      let out = ErrorOut { kind: e.kind().to_string(), message: e.to_string() };
      (status, Json(out)).into_response()
    }
  }
}
