//! Error types for the innovate-search crate.
//!
//! Only [`SearchError::InvalidQuery`] ever reaches a caller of
//! [`crate::Resolver::resolve`]. Every other variant describes why a single
//! engine declined and is consumed inside the fallback chain. No API keys
//! appear in error messages.

/// Errors that can occur while resolving a research query.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query was empty or whitespace-only.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// An engine cannot run with the current capabilities or configuration.
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    /// An engine attempt exceeded its time budget.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// An HTTP request to a backend failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A backend response could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid resolver configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Whether this error is one the resolver absorbs by moving to the next engine.
    pub fn is_engine_failure(&self) -> bool {
        matches!(
            self,
            Self::Unavailable(_) | Self::Timeout(_) | Self::Http(_) | Self::Parse(_)
        )
    }
}

/// Convenience type alias for innovate-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
