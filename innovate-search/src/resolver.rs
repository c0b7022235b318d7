//! The research resolver: walk the fallback chain, return the first answer.
//!
//! Engines run one at a time. Each attempt gets the configured time budget;
//! a failure, timeout, or empty answer moves on to the next engine. The mock
//! engine closes every chain, so a valid query always resolves.

use std::time::{Duration, Instant};

use crate::config::{Capabilities, SearchConfig};
use crate::engine::ResearchEngine;
use crate::engines::{
    Backend, DuckDuckGoInstantEngine, DuckDuckGoWebEngine, MockEngine, SerpApiEngine,
};
use crate::error::{Result, SearchError};
use crate::http;
use crate::types::{EngineKind, EnginePreference, SearchQuery, SearchResult};

/// Resolves research queries against an ordered chain of engines.
///
/// Holds only immutable state; share it freely between concurrent
/// pipeline runs.
#[derive(Debug)]
pub struct Resolver {
    config: SearchConfig,
    capabilities: Capabilities,
    backends: Vec<Backend>,
}

impl Resolver {
    /// Build a resolver for `config` with the credentials in `capabilities`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: SearchConfig, capabilities: Capabilities) -> Result<Self> {
        config.validate()?;
        let client = http::build_client(&config)?;

        let backends = EngineKind::default_order()
            .iter()
            .copied()
            .filter(|kind| config.is_enabled(*kind))
            .map(|kind| match kind {
                EngineKind::DuckDuckGoInstant => {
                    Backend::DuckDuckGoInstant(DuckDuckGoInstantEngine::new(client.clone(), &config))
                }
                EngineKind::DuckDuckGoWeb => {
                    Backend::DuckDuckGoWeb(DuckDuckGoWebEngine::new(config.max_related_topics))
                }
                EngineKind::SerpApi => {
                    Backend::SerpApi(SerpApiEngine::new(client.clone(), &config, &capabilities))
                }
                EngineKind::Mock => Backend::Mock(MockEngine::new(config.max_related_topics)),
            })
            .collect();

        tracing::debug!(?capabilities, engines = ?config.engines, "research resolver ready");

        Ok(Self {
            config,
            capabilities,
            backends,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Engines that can run right now, in default priority order.
    pub fn available_engines(&self) -> Vec<EngineKind> {
        self.backends
            .iter()
            .filter(|b| b.is_available())
            .map(|b| b.kind())
            .collect()
    }

    /// The order engines will be attempted in for `preference`.
    ///
    /// A preferred engine goes first, then every other enabled engine in
    /// default order. Preferring a disabled engine has no effect.
    pub fn attempt_order(&self, preference: EnginePreference) -> Vec<EngineKind> {
        let mut order = Vec::with_capacity(self.backends.len());
        if let Some(preferred) = preference.engine() {
            if self.config.is_enabled(preferred) {
                order.push(preferred);
            } else {
                tracing::debug!(engine = %preferred, "preferred engine is disabled; ignoring");
            }
        }
        for backend in &self.backends {
            let kind = backend.kind();
            if !order.contains(&kind) {
                order.push(kind);
            }
        }
        order
    }

    /// Resolve a raw query string with an optional engine hint.
    ///
    /// An unrecognised `preferred_engine` is logged and treated as `auto`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] if `query` is empty after
    /// trimming. No other error is ever returned.
    pub async fn resolve(&self, query: &str, preferred_engine: Option<&str>) -> Result<SearchResult> {
        let mut search_query = SearchQuery::new(query)?;
        if let Some(hint) = preferred_engine {
            match hint.parse::<EnginePreference>() {
                Ok(preference) => search_query = search_query.with_preference(preference),
                Err(e) => tracing::warn!(error = %e, "ignoring engine preference"),
            }
        }
        Ok(self.resolve_query(&search_query).await)
    }

    /// Resolve an already-validated query. Infallible.
    pub async fn resolve_query(&self, query: &SearchQuery) -> SearchResult {
        let budget = Duration::from_secs(self.config.timeout_seconds);
        tracing::trace!(query = query.text(), preference = %query.preference(), "resolving research query");

        for kind in self.attempt_order(query.preference()) {
            let Some(backend) = self.backends.iter().find(|b| b.kind() == kind) else {
                continue;
            };

            let started = Instant::now();
            let outcome = tokio::time::timeout(budget, backend.attempt(query)).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match outcome {
                Ok(Ok(Some(result))) if result.has_summary() => {
                    tracing::info!(
                        engine = %kind,
                        words = result.raw_word_count,
                        related = result.related_topics.len(),
                        elapsed_ms,
                        "research resolved"
                    );
                    return result;
                }
                Ok(Ok(_)) => {
                    tracing::debug!(engine = %kind, elapsed_ms, "engine returned no summary");
                }
                Ok(Err(SearchError::Unavailable(reason))) => {
                    tracing::debug!(engine = %kind, %reason, "engine unavailable");
                }
                Ok(Err(err)) => {
                    tracing::warn!(engine = %kind, error = %err, elapsed_ms, "engine failed, falling back");
                }
                Err(_) => {
                    tracing::warn!(
                        engine = %kind,
                        timeout_seconds = self.config.timeout_seconds,
                        "engine timed out, falling back"
                    );
                }
            }
        }

        // `new` always enables mock, so a chain only runs dry if that backend is missing.
        tracing::warn!("fallback chain exhausted, using offline research");
        MockEngine::new(self.config.max_related_topics).generate(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(engines: Vec<EngineKind>, caps: Capabilities) -> Resolver {
        let config = SearchConfig {
            engines,
            // Unroutable so nothing leaves the machine if an engine is reached.
            instant_answer_url: "http://127.0.0.1:9/".into(),
            serpapi_url: "http://127.0.0.1:9/search.json".into(),
            timeout_seconds: 1,
            ..Default::default()
        };
        Resolver::new(config, caps).expect("valid config")
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = Resolver::new(config, Capabilities::none()).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn default_order_without_preference() {
        let r = resolver(EngineKind::default_order().to_vec(), Capabilities::none());
        assert_eq!(
            r.attempt_order(EnginePreference::Auto),
            vec![
                EngineKind::DuckDuckGoInstant,
                EngineKind::DuckDuckGoWeb,
                EngineKind::SerpApi,
                EngineKind::Mock,
            ]
        );
    }

    #[test]
    fn preferred_engine_goes_first_rest_in_default_order() {
        let r = resolver(EngineKind::default_order().to_vec(), Capabilities::none());
        assert_eq!(
            r.attempt_order(EnginePreference::Engine(EngineKind::SerpApi)),
            vec![
                EngineKind::SerpApi,
                EngineKind::DuckDuckGoInstant,
                EngineKind::DuckDuckGoWeb,
                EngineKind::Mock,
            ]
        );
        assert_eq!(
            r.attempt_order(EnginePreference::Engine(EngineKind::Mock)),
            vec![
                EngineKind::Mock,
                EngineKind::DuckDuckGoInstant,
                EngineKind::DuckDuckGoWeb,
                EngineKind::SerpApi,
            ]
        );
    }

    #[test]
    fn disabled_preference_is_ignored() {
        let r = resolver(vec![EngineKind::DuckDuckGoInstant], Capabilities::none());
        assert_eq!(
            r.attempt_order(EnginePreference::Engine(EngineKind::DuckDuckGoWeb)),
            vec![EngineKind::DuckDuckGoInstant, EngineKind::Mock]
        );
    }

    #[test]
    fn mock_is_always_in_the_chain() {
        let r = resolver(vec![], Capabilities::none());
        assert_eq!(r.attempt_order(EnginePreference::Auto), vec![EngineKind::Mock]);
        assert_eq!(r.available_engines(), vec![EngineKind::Mock]);
    }

    #[test]
    fn serpapi_listed_only_with_key() {
        let without = resolver(EngineKind::default_order().to_vec(), Capabilities::none());
        assert!(!without.available_engines().contains(&EngineKind::SerpApi));

        let with = resolver(
            EngineKind::default_order().to_vec(),
            Capabilities::with_serpapi_key(Some("k".into())),
        );
        assert_eq!(with.available_engines(), EngineKind::default_order());
    }

    #[tokio::test]
    async fn empty_query_is_invalid() {
        let r = resolver(vec![], Capabilities::none());
        for q in ["", "   ", "\n\t"] {
            let err = r.resolve(q, None).await.unwrap_err();
            assert!(matches!(err, SearchError::InvalidQuery(_)));
        }
    }

    #[tokio::test]
    async fn mock_preference_resolves_offline() {
        let r = resolver(EngineKind::default_order().to_vec(), Capabilities::none());
        let result = r.resolve("business automation", Some("mock")).await.expect("valid");
        assert_eq!(result.engine_used, EngineKind::Mock);
        assert!(result.has_summary());
    }

    #[tokio::test]
    async fn web_preference_skips_network() {
        let r = resolver(EngineKind::default_order().to_vec(), Capabilities::none());
        let result = r.resolve("cloud computing", Some("duckduckgo_web")).await.expect("valid");
        assert_eq!(result.engine_used, EngineKind::DuckDuckGoWeb);
    }

    #[tokio::test]
    async fn unknown_preference_falls_back_to_auto() {
        let r = resolver(vec![EngineKind::DuckDuckGoWeb], Capabilities::none());
        let result = r.resolve("fintech", Some("altavista")).await.expect("valid");
        assert_eq!(result.engine_used, EngineKind::DuckDuckGoWeb);
    }

    #[tokio::test]
    async fn exhausted_chain_still_answers() {
        let base = resolver(vec![EngineKind::DuckDuckGoInstant], Capabilities::none());
        let instant = base
            .backends
            .iter()
            .find(|b| b.kind() == EngineKind::DuckDuckGoInstant)
            .cloned()
            .expect("instant backend");
        let r = Resolver {
            backends: vec![instant],
            ..base
        };
        assert_eq!(r.available_engines(), vec![EngineKind::DuckDuckGoInstant]);

        let query = SearchQuery::new("edge computing").expect("valid");
        let result = r.resolve_query(&query).await;
        assert_eq!(result.engine_used, EngineKind::Mock);
        assert!(result.summary.contains("edge computing"));
    }

    #[test]
    fn resolver_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Resolver>();
    }
}
