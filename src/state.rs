//! Application state: configuration, the answer corpus and the Wikipedia client.
//!
//! State is immutable after startup. Per-session data (the set of answers already
//! attempted) is owned by the caller: one set per HTTP request or WebSocket connection.

use tracing::{error, info, instrument, warn};

use crate::config::{load_config_from_env, AppConfig};
use crate::corpus::Corpus;
use crate::error::FetchError;
use crate::seeds::seed_corpus;
use crate::wiki::WikiClient;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub corpus: Corpus,
    pub wiki: WikiClient,
}

impl AppState {
    /// Build state from env: load config, load the corpus (or the seed corpus), init the client.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Result<Self, FetchError> {
        let config = load_config_from_env().unwrap_or_default();
        let corpus = load_corpus(&config);
        Self::new(config, corpus)
    }

    pub fn new(config: AppConfig, corpus: Corpus) -> Result<Self, FetchError> {
        let wiki = WikiClient::from_config(&config.wiki)?;

        for level in 1..=corpus.level_count() {
            let topics = corpus.topics(level);
            let answers = corpus.candidates(level, None).len();
            info!(target: "question", level, topics = topics.len(), answers, "Startup corpus inventory");
        }
        info!(target: "tossup_backend", api_url = %wiki.api_url, "Wikipedia client ready");

        Ok(Self { config, corpus, wiki })
    }

    /// Clamp a requested difficulty into the corpus' level range.
    pub fn difficulty(&self, requested: Option<usize>) -> usize {
        let max = self.corpus.level_count().max(1);
        requested
            .unwrap_or(self.config.packet.default_difficulty)
            .clamp(1, max)
    }

    /// Clamp a requested packet size.
    pub fn packet_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.config.packet.default_count)
            .min(self.config.packet.max_count)
    }
}

fn load_corpus(config: &AppConfig) -> Corpus {
    match &config.corpus.path {
        Some(path) => match Corpus::load(path) {
            Ok(corpus) => {
                info!(target: "tossup_backend", %path, levels = corpus.level_count(), "Loaded corpus");
                corpus
            }
            Err(e) => {
                error!(target: "tossup_backend", %path, error = %e, "Failed to load corpus; using seed corpus");
                seed_corpus()
            }
        },
        None => {
            warn!(target: "tossup_backend", "No corpus path configured; using seed corpus");
            seed_corpus()
        }
    }
}
