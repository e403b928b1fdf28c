//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. Packets are streamed: one `question` message per generated
//! question, then a `packet_done` summary.
//!
//! The set of answers already attempted lives for the whole connection, so repeated
//! packet requests don't serve the same answer twice until `reset_seen`.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::domain::Topic;
use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "tossup_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "tossup_backend", "WebSocket connected");
  let mut seen = HashSet::new();
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let sent = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "tossup_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state, &mut seen, &mut socket).await
          }
          Err(e) => {
            let reply = ServerWsMessage::Error { kind: None, message: format!("Invalid JSON: {}", e) };
            send(&mut socket, &reply).await
          }
        };
        if !sent {
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "tossup_backend", "WebSocket disconnected");
}

/// Serialize and send one message. False once the socket is gone.
async fn send(socket: &mut WebSocket, msg: &ServerWsMessage) -> bool {
  let out = serde_json::to_string(msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  });
  match socket.send(Message::Text(out)).await {
    Ok(()) => true,
    Err(e) => {
      error!(target: "tossup_backend", error = %e, "WS send error");
      false
    }
  }
}

#[instrument(level = "info", skip(state, seen, socket))]
async fn handle_client_ws(
  msg: ClientWsMessage,
  state: &AppState,
  seen: &mut HashSet<String>,
  socket: &mut WebSocket,
) -> bool {
  match msg {
    ClientWsMessage::Ping => send(socket, &ServerWsMessage::Pong).await,

    ClientWsMessage::GeneratePacket { topic, difficulty, count } => {
      let difficulty = state.difficulty(difficulty);
      let requested = state.packet_count(count);
      let candidates = state.corpus.candidates(difficulty, topic.as_deref());
      let mut generated = 0;
      if !candidates.is_empty() {
        for _ in 0..requested {
          if let Some(question) = fill_slot(state, &candidates, seen).await {
            generated += 1;
            if !send(socket, &ServerWsMessage::Question { question }).await {
              return false;
            }
          }
        }
      }
      info!(target: "question", ?topic, difficulty, requested, generated, "WS packet served");
      send(socket, &ServerWsMessage::PacketDone { requested, generated }).await
    }

    ClientWsMessage::GenerateQuestion { topic, answer, seed } => {
      let topic = Topic::from(topic);
      let reply = match attempt_question(state, &topic, &answer, seed).await {
        Ok(question) => ServerWsMessage::Question { question },
        Err(e) => ServerWsMessage::Error { kind: Some(e.kind().to_string()), message: e.to_string() },
      };
      send(socket, &reply).await
    }

    ClientWsMessage::ResetSeen => {
      seen.clear();
      send(socket, &ServerWsMessage::SeenReset).await
    }
  }
}
