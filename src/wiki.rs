//! Minimal Wikipedia API client for our use-cases.
//!
//! We only call `action=query`, either for a plain-text article extract or for the members
//! of a category. Calls are instrumented and log titles, statuses and response sizes.
//! Transport errors and 429/5xx answers are retried with a linear back-off.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::WikiConfig;
use crate::error::FetchError;

#[derive(Clone)]
pub struct WikiClient {
  pub client: reqwest::Client,
  pub api_url: String,
  pub user_agent: String,
  pub max_retries: u32,
  pub retry_backoff: Duration,
}

#[derive(Deserialize)]
struct QueryResponse<T> {
  query: Option<T>,
}

#[derive(Deserialize)]
struct PagesQuery {
  #[serde(default)]
  pages: HashMap<String, Page>,
}

#[derive(Deserialize)]
struct Page {
  #[serde(default)]
  extract: Option<String>,
}

#[derive(Deserialize)]
struct MembersQuery {
  #[serde(default)]
  categorymembers: Vec<CategoryMember>,
}

/// One entry of a category listing. Namespace 14 is a subcategory.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CategoryMember {
  pub ns: i64,
  pub title: String,
}

impl WikiClient {
  pub fn from_config(cfg: &WikiConfig) -> Result<Self, FetchError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(cfg.timeout_secs))
      .build()?;
    Ok(Self {
      client,
      api_url: cfg.api_url.clone(),
      user_agent: cfg.user_agent.clone(),
      max_retries: cfg.max_retries,
      retry_backoff: Duration::from_millis(cfg.retry_backoff_ms),
    })
  }

  /// Plain-text extract of the article titled `title`. `None` when there is no such page.
  #[instrument(level = "info", skip(self), fields(%title))]
  pub async fn fetch_article_text(&self, title: &str) -> Result<Option<String>, FetchError> {
    let params = [
      ("action", "query"),
      ("explaintext", "true"),
      ("exsectionformat", "plain"),
      ("format", "json"),
      ("prop", "extracts"),
      ("titles", title),
    ];
    let body: QueryResponse<PagesQuery> = self.query(&params).await?;
    let text = first_extract(body);
    debug!(target: "tossup_backend", %title, found = text.is_some(), len = text.as_ref().map_or(0, |t| t.len()), "Article fetched");
    Ok(text)
  }

  /// Up to 500 members of `category` (e.g. "Category:Physics").
  #[instrument(level = "info", skip(self), fields(%category))]
  pub async fn category_members(&self, category: &str) -> Result<Vec<CategoryMember>, FetchError> {
    let params = [
      ("action", "query"),
      ("cmlimit", "500"),
      ("cmtitle", category),
      ("format", "json"),
      ("list", "categorymembers"),
    ];
    let body: QueryResponse<MembersQuery> = self.query(&params).await?;
    let query = body
      .query
      .ok_or_else(|| FetchError::Malformed(format!("no query block for {category}")))?;
    Ok(query.categorymembers)
  }

  async fn query<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, FetchError> {
    let mut attempt = 0;
    loop {
      match self.query_once(params).await {
        Err(e) if attempt < self.max_retries && is_retryable(&e) => {
          attempt += 1;
          warn!(target: "tossup_backend", attempt, error = %e, "Wikipedia request failed; retrying");
          tokio::time::sleep(self.retry_backoff * attempt).await;
        }
        other => return other,
      }
    }
  }

  async fn query_once<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, FetchError> {
    let res = self
      .client
      .get(&self.api_url)
      .header(USER_AGENT, &self.user_agent)
      .query(params)
      .send()
      .await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      return Err(FetchError::Status { status, body: crate::util::trunc_for_log(&body, 200) });
    }
    Ok(res.json::<T>().await?)
  }
}

fn is_retryable(e: &FetchError) -> bool {
  match e {
    FetchError::Http(err) => err.is_timeout() || err.is_connect() || err.is_request(),
    FetchError::Status { status, .. } => {
      *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
    }
    FetchError::Malformed(_) => false,
  }
}

fn first_extract(body: QueryResponse<PagesQuery>) -> Option<String> {
  body
    .query?
    .pages
    .into_values()
    .next()?
    .extract
    .filter(|t| !t.trim().is_empty())
}
