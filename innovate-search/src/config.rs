//! Resolver configuration and startup capabilities.
//!
//! [`SearchConfig`] controls which engines may run, timeouts, and backend
//! endpoints. [`Capabilities`] records which credentials were present when
//! the process started; it is computed once and handed to the resolver.

use crate::error::SearchError;
use crate::types::EngineKind;

/// Environment variable holding the SerpAPI key.
pub const SERPAPI_KEY_ENV: &str = "SERPAPI_API_KEY";

/// Default DuckDuckGo Instant Answer endpoint.
pub const DEFAULT_INSTANT_ANSWER_URL: &str = "https://api.duckduckgo.com/";

/// Default SerpAPI search endpoint.
pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com/search.json";

/// Configuration for the research resolver.
///
/// Use [`Default::default()`] for production endpoints, or override the URLs
/// to point at a local mock server.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Engines allowed to run. Attempted in default priority order.
    /// The mock engine always runs last even when absent from this list.
    pub engines: Vec<EngineKind>,
    /// Per-attempt time budget in seconds, applied to the HTTP client and
    /// to the attempt as a whole.
    pub timeout_seconds: u64,
    /// Maximum number of related topics kept from any engine.
    pub max_related_topics: usize,
    /// Number of organic results requested from SerpAPI.
    pub serpapi_results: usize,
    /// DuckDuckGo Instant Answer endpoint.
    pub instant_answer_url: String,
    /// SerpAPI search endpoint.
    pub serpapi_url: String,
    /// Custom User-Agent string. If `None`, rotates through a built-in list.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engines: EngineKind::default_order().to_vec(),
            timeout_seconds: 5,
            max_related_topics: 5,
            serpapi_results: 5,
            instant_answer_url: DEFAULT_INSTANT_ANSWER_URL.to_string(),
            serpapi_url: DEFAULT_SERPAPI_URL.to_string(),
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `max_related_topics` and `serpapi_results` must be greater than 0
    /// - both endpoint URLs must parse
    /// - a custom `user_agent` must not be blank
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_related_topics == 0 {
            return Err(SearchError::Config(
                "max_related_topics must be greater than 0".into(),
            ));
        }
        if self.serpapi_results == 0 {
            return Err(SearchError::Config(
                "serpapi_results must be greater than 0".into(),
            ));
        }
        for (field, value) in [
            ("instant_answer_url", &self.instant_answer_url),
            ("serpapi_url", &self.serpapi_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| SearchError::Config(format!("{field} is not a valid URL: {e}")))?;
        }
        if self
            .user_agent
            .as_deref()
            .is_some_and(|ua| ua.trim().is_empty())
        {
            return Err(SearchError::Config("user_agent must not be blank".into()));
        }
        Ok(())
    }

    /// Whether `engine` may run. Mock is always enabled.
    pub fn is_enabled(&self, engine: EngineKind) -> bool {
        engine == EngineKind::Mock || self.engines.contains(&engine)
    }
}

/// Credentials available to the resolver, captured once at startup.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    serpapi_key: Option<String>,
}

impl Capabilities {
    /// No credentials; only keyless engines can run.
    pub fn none() -> Self {
        Self::default()
    }

    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self::with_serpapi_key(std::env::var(SERPAPI_KEY_ENV).ok())
    }

    /// Build capabilities from an explicit key. Blank keys count as absent.
    pub fn with_serpapi_key(key: Option<String>) -> Self {
        let serpapi_key = key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self { serpapi_key }
    }

    pub fn serpapi_key(&self) -> Option<&str> {
        self.serpapi_key.as_deref()
    }

    pub fn has_serpapi(&self) -> bool {
        self.serpapi_key.is_some()
    }
}

// Keys never reach logs.
impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("serpapi", &self.has_serpapi())
            .finish()
    }
}
