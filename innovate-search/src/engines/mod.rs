//! Research backend implementations.
//!
//! Each module provides a struct implementing [`crate::engine::ResearchEngine`].
//! [`Backend`] tags them so the resolver can hold an ordered chain of
//! mixed engines and dispatch without boxing.

pub mod duckduckgo_instant;
pub mod duckduckgo_web;
pub mod mock;
pub mod serpapi;

pub use duckduckgo_instant::DuckDuckGoInstantEngine;
pub use duckduckgo_web::DuckDuckGoWebEngine;
pub use mock::MockEngine;
pub use serpapi::SerpApiEngine;

use crate::engine::ResearchEngine;
use crate::error::SearchError;
use crate::types::{EngineKind, SearchQuery, SearchResult};

/// One entry of a fallback chain.
#[derive(Debug, Clone)]
pub enum Backend {
    DuckDuckGoInstant(DuckDuckGoInstantEngine),
    DuckDuckGoWeb(DuckDuckGoWebEngine),
    SerpApi(SerpApiEngine),
    Mock(MockEngine),
}

impl Backend {
    /// Whether an attempt could succeed with the credentials this backend holds.
    pub fn is_available(&self) -> bool {
        match self {
            Self::SerpApi(engine) => engine.has_credential(),
            _ => true,
        }
    }
}

impl ResearchEngine for Backend {
    async fn attempt(&self, query: &SearchQuery) -> Result<Option<SearchResult>, SearchError> {
        match self {
            Self::DuckDuckGoInstant(engine) => engine.attempt(query).await,
            Self::DuckDuckGoWeb(engine) => engine.attempt(query).await,
            Self::SerpApi(engine) => engine.attempt(query).await,
            Self::Mock(engine) => engine.attempt(query).await,
        }
    }

    fn kind(&self) -> EngineKind {
        match self {
            Self::DuckDuckGoInstant(engine) => engine.kind(),
            Self::DuckDuckGoWeb(engine) => engine.kind(),
            Self::SerpApi(engine) => engine.kind(),
            Self::Mock(engine) => engine.kind(),
        }
    }
}
