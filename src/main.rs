//! Tossup · Trivia Question Backend
//!
//! - Turns encyclopedia articles into gated-disclosure trivia questions
//! - Axum HTTP + WebSocket API
//! - Static SPA fallback (./static/index.html)
//!
//! Usage:
//!   tossup-backend              : serve
//!   tossup-backend crawl [OUT]  : build the vital-articles corpus JSON
//!
//! Important env variables:
//!   PORT               : u16 (default 3000)
//!   TOSSUP_CONFIG_PATH : path to TOML config (Wikipedia client, corpus path, packet policy)
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

mod telemetry;
mod util;
mod error;
mod domain;
mod config;
mod corpus;
mod seeds;
mod wiki;
mod pipeline;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::load_config_from_env;
use crate::routes::build_router;
use crate::state::AppState;
use crate::wiki::WikiClient;

const DEFAULT_CORPUS_PATH: &str = "vital-articles.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let mut args = std::env::args().skip(1);
  if args.next().as_deref() == Some("crawl") {
    return crawl(args.next()).await;
  }

  let state = Arc::new(AppState::from_env()?);
  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "tossup_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}

/// One-off corpus build. Writes to OUT, else the configured corpus path, else the default.
async fn crawl(out: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
  let config = load_config_from_env().unwrap_or_default();
  let path = out
    .or_else(|| config.corpus.path.clone())
    .unwrap_or_else(|| DEFAULT_CORPUS_PATH.to_string());

  let wiki = WikiClient::from_config(&config.wiki)?;
  let corpus = corpus::crawl(&wiki).await?;
  corpus.save(&path)?;
  info!(target: "tossup_backend", %path, levels = corpus.level_count(), "Corpus written");
  Ok(())
}
