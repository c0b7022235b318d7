//! Error types for the research stage.

use innovate_search::SearchError;

/// Top-level error type for the Innovate pipeline.
#[derive(Debug, thiserror::Error)]
pub enum InnovateError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Research resolution error. In practice only an invalid query.
    #[error("research error: {0}")]
    Research(#[from] SearchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, InnovateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_config() {
        let err = InnovateError::Config("timeout_seconds must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "config error: timeout_seconds must be greater than 0"
        );
    }

    #[test]
    fn research_errors_convert() {
        let err: InnovateError = SearchError::InvalidQuery("query must not be empty".into()).into();
        assert_eq!(
            err.to_string(),
            "research error: invalid query: query must not be empty"
        );
    }

    #[test]
    fn io_errors_convert() {
        let err: InnovateError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
