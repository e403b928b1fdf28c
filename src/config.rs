//! Loading service configuration (Wikipedia client, corpus location, packet policy) from TOML.
//!
//! Every field has a default, so an absent or partial file is fine.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub wiki: WikiConfig,
  #[serde(default)]
  pub corpus: CorpusConfig,
  #[serde(default)]
  pub packet: PacketConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
  pub api_url: String,
  pub user_agent: String,
  pub timeout_secs: u64,
  /// Extra tries after a transport error or a 429/5xx answer.
  pub max_retries: u32,
  pub retry_backoff_ms: u64,
}

impl Default for WikiConfig {
  fn default() -> Self {
    Self {
      api_url: "https://en.wikipedia.org/w/api.php".into(),
      user_agent: "tossup-backend/0.1".into(),
      timeout_secs: 20,
      max_retries: 2,
      retry_backoff_ms: 500,
    }
  }
}

/// Where the vital-articles corpus lives. Without a path the built-in seed corpus is used.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct CorpusConfig {
  #[serde(default)]
  pub path: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PacketConfig {
  pub attempts_per_question: usize,
  pub default_count: usize,
  pub max_count: usize,
  pub default_difficulty: usize,
}

impl Default for PacketConfig {
  fn default() -> Self {
    Self { attempts_per_question: 5, default_count: 10, max_count: 50, default_difficulty: 1 }
  }
}

pub fn parse_config(s: &str) -> Result<AppConfig, toml::de::Error> {
  toml::from_str::<AppConfig>(s)
}

/// Attempt to load `AppConfig` from TOSSUP_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("TOSSUP_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "tossup_backend", %path, "Loaded config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "tossup_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "tossup_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
