//! Trait definition for the research backends.
//!
//! Each backend (instant answers, simulated web search, SerpAPI, mock)
//! implements [`ResearchEngine`] so the resolver can walk its fallback
//! chain uniformly.

use crate::error::SearchError;
use crate::types::{EngineKind, SearchQuery, SearchResult};

/// A single step of the fallback chain.
///
/// An attempt has three outcomes:
///
/// - `Ok(Some(result))`: the engine answered.
/// - `Ok(None)`: the engine was reachable but had nothing to say.
/// - `Err(_)`: transport, credential, or decoding failure.
///
/// The resolver treats the last two identically (advance to the next
/// engine) but logs them at different levels.
///
/// All implementations must be `Send + Sync` so one resolver can serve
/// concurrent pipeline runs.
pub trait ResearchEngine: Send + Sync {
    /// Try to answer `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the backend cannot be reached, rejects
    /// the request, or returns something that cannot be decoded.
    fn attempt(
        &self,
        query: &SearchQuery,
    ) -> impl std::future::Future<Output = Result<Option<SearchResult>, SearchError>> + Send;

    /// Which [`EngineKind`] this implementation represents.
    fn kind(&self) -> EngineKind;
}
