//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Question, Topic};
use crate::pipeline::format::{polish_hint, render_html};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    GeneratePacket {
        #[serde(default)]
        topic: Option<String>,
        #[serde(default)]
        difficulty: Option<usize>,
        #[serde(default)]
        count: Option<usize>,
    },
    GenerateQuestion {
        topic: String,
        answer: String,
        #[serde(default)]
        seed: Option<u64>,
    },
    ResetSeen,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Question {
        question: QuestionOut,
    },
    PacketDone {
        requested: usize,
        generated: usize,
    },
    SeenReset,
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        message: String,
    },
}

/// DTO used by both WS and HTTP for question delivery.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionOut {
    pub id: String,
    pub topic: Topic,
    pub hints: Vec<String>,
    pub raw_answer: String,
    pub display_answer: String,
    pub html: String,
}

/// Convert a generated `Question` to the public DTO.
pub fn to_out(q: &Question) -> QuestionOut {
    QuestionOut {
        id: Uuid::new_v4().to_string(),
        topic: q.topic.clone(),
        hints: q.hints.iter().map(|h| polish_hint(h)).collect(),
        raw_answer: q.raw_answer.clone(),
        display_answer: q.display_answer.clone(),
        html: render_html(q),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct PacketQuery {
    pub topic: Option<String>,
    pub difficulty: Option<usize>,
    pub count: Option<usize>,
}

#[derive(Serialize)]
pub struct PacketOut {
    pub requested: usize,
    pub questions: Vec<QuestionOut>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionIn {
    pub topic: String,
    pub answer: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct TopicsQuery {
    pub difficulty: Option<usize>,
}

#[derive(Serialize)]
pub struct TopicsOut {
    pub difficulty: usize,
    pub topics: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub kind: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_are_tagged() {
        let msg: ClientWsMessage =
            serde_json::from_str(r#"{"type":"generate_packet","topic":"People","count":2}"#).unwrap();
        match msg {
            ClientWsMessage::GeneratePacket { topic, difficulty, count } => {
                assert_eq!(topic.as_deref(), Some("People"));
                assert_eq!(difficulty, None);
                assert_eq!(count, Some(2));
            }
            other => panic!("unexpected {other:?}"),
        }
        let msg: ClientWsMessage = serde_json::from_str(r#"{"type":"reset_seen"}"#).unwrap();
        assert!(matches!(msg, ClientWsMessage::ResetSeen));
    }

    #[test]
    fn question_out_carries_polished_hints_and_html() {
        let q = Question {
            topic: Topic::People,
            hints: vec!["<em>this person</em> also wrote plays.".into()],
            raw_answer: "William Shakespeare".into(),
            display_answer: "William Shakespeare".into(),
        };
        let out = to_out(&q);
        assert_eq!(out.hints, vec!["<em>This person</em> wrote plays."]);
        assert!(out.html.contains("https://en.wikipedia.org/wiki/William_Shakespeare"));
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["topic"], "People");

        let err = serde_json::to_value(ServerWsMessage::Error { kind: None, message: "x".into() }).unwrap();
        assert_eq!(err, serde_json::json!({"type": "error", "message": "x"}));
    }
}
