//! HTTP surface: the versioned question API, the packet WebSocket and the SPA fallback.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

const STATIC_DIR: &str = "./static";

/// JSON endpoints, mounted under `/api/v1`.
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(http::http_health))
        .route("/topics", get(http::http_get_topics))
        .route("/packet", get(http::http_get_packet))
        .route("/question", post(http::http_post_question))
}

/// Packet streaming over `/ws`, JSON under `/api/v1`, anything else from the static dir.
/// Browser frontends may be served from elsewhere, so CORS is open.
pub fn build_router(state: Arc<AppState>) -> Router {
    let spa = ServeDir::new(STATIC_DIR)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(format!("{STATIC_DIR}/index.html")));

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/ws", get(ws::ws_upgrade))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(trace)
        .fallback_service(spa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::seeds::seed_corpus;

    fn app() -> Router {
        let state = AppState::new(AppConfig::default(), seed_corpus()).unwrap();
        build_router(Arc::new(state))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let res = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = get_json("/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "ok": true }));
    }

    #[tokio::test]
    async fn topics_list_seed_categories() {
        let (status, body) = get_json("/api/v1/topics?difficulty=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["difficulty"], 1);
        let topics = body["topics"].as_array().unwrap();
        assert!(topics.iter().any(|t| t == "Geography"));
    }

    #[tokio::test]
    async fn question_rejects_missing_fields() {
        let res = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/question")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"topic":"People"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(res.status().is_client_error());
    }

    #[tokio::test]
    async fn packet_for_unknown_topic_is_empty() {
        let (status, body) = get_json("/api/v1/packet?topic=Nope&count=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["requested"], 2);
        assert_eq!(body["questions"], serde_json::json!([]));
    }
}
