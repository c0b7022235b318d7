//! # innovate-search
//!
//! Research resolver for the Innovate content pipeline.
//!
//! Given a topic, the resolver tries a fixed chain of backends and returns
//! the first non-empty answer, normalised into a single [`SearchResult`]
//! shape and tagged with the engine that produced it.
//!
//! ## Fallback chain
//!
//! 1. DuckDuckGo Instant Answer API (abstracts and definitions)
//! 2. Simulated DuckDuckGo web search (deterministic, offline)
//! 3. SerpAPI Google search, only when `SERPAPI_API_KEY` is set
//! 4. Mock research templates (offline, never fails)
//!
//! A preferred engine, when given, is tried first and the rest follow in
//! the order above. Backend failures never reach the caller: the only
//! error a resolution can produce is [`SearchError::InvalidQuery`].
//!
//! ## Security
//!
//! - Queries are logged only at trace level
//! - The SerpAPI key never appears in logs, errors, or `Debug` output

pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod http;
pub mod resolver;
mod text;
pub mod types;

pub use config::{Capabilities, SearchConfig};
pub use engine::ResearchEngine;
pub use error::{Result, SearchError};
pub use resolver::Resolver;
pub use types::{ContentType, EngineKind, EnginePreference, SearchQuery, SearchResult};

/// Resolve one research query with a throwaway [`Resolver`].
///
/// Prefer building a [`Resolver`] once and reusing it when resolving
/// several queries.
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] for an empty query, or
/// [`SearchError::Config`] if `config` is invalid.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> innovate_search::Result<()> {
/// let config = innovate_search::SearchConfig::default();
/// let caps = innovate_search::Capabilities::from_env();
/// let result = innovate_search::resolve("machine learning", None, &config, &caps).await?;
/// println!("[{}] {}", result.engine_used, result.summary);
/// # Ok(())
/// # }
/// ```
pub async fn resolve(
    query: &str,
    preferred_engine: Option<&str>,
    config: &SearchConfig,
    capabilities: &Capabilities,
) -> Result<SearchResult> {
    let resolver = Resolver::new(config.clone(), capabilities.clone())?;
    resolver.resolve(query, preferred_engine).await
}

/// Resolve with default configuration and credentials from the environment.
///
/// # Errors
///
/// Same as [`resolve`].
pub async fn resolve_default(query: &str) -> Result<SearchResult> {
    resolve(
        query,
        None,
        &SearchConfig::default(),
        &Capabilities::from_env(),
    )
    .await
}
