//! HTTP plumbing for the JSON-speaking backends.
//!
//! The Instant Answer API and SerpAPI are both plain GET endpoints that
//! return JSON. One [`reqwest::Client`] per resolver serves both; it asks
//! for JSON, carries the per-attempt time budget, and follows at most a
//! handful of redirects. Transport errors are folded into [`SearchError`]
//! by [`classify`].

use crate::config::SearchConfig;
use crate::error::SearchError;
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;

/// Browser User-Agents, one picked per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
];

const MAX_REDIRECTS: usize = 5;

/// Build the client shared by the remote engines of one resolver.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the user agent is not a valid header
/// value or the TLS backend cannot start.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let budget = Duration::from_secs(config.timeout_seconds);

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .user_agent(user_agent_for(config))
        .timeout(budget)
        .connect_timeout(budget)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))
}

/// The configured User-Agent, or one drawn from the browser list.
fn user_agent_for(config: &SearchConfig) -> String {
    match config.user_agent.as_deref() {
        Some(custom) => custom.trim().to_string(),
        None => random_user_agent().to_string(),
    }
}

/// Pick a browser User-Agent at random.
pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Map a transport error onto the engine failure taxonomy.
pub(crate) fn classify(engine: &str, err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::Timeout(format!("{engine} request timed out"))
    } else if let Some(status) = err.status() {
        SearchError::Http(format!("{engine} returned {status}"))
    } else {
        SearchError::Http(format!("{engine} request failed: {err}"))
    }
}
