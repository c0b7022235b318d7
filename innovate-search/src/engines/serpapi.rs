//! SerpAPI Google search backend.
//!
//! Only usable when `SERPAPI_API_KEY` was present at startup. Calls the
//! `search.json` endpoint with `engine=google` and folds the answer box
//! and organic snippets into one summary.

use crate::config::{Capabilities, SearchConfig, SERPAPI_KEY_ENV};
use crate::engine::ResearchEngine;
use crate::error::SearchError;
use crate::http;
use crate::text::{non_blank, null_as_empty};
use crate::types::{EngineKind, SearchQuery, SearchResult};
use serde::Deserialize;

/// SerpAPI client. Declines with [`SearchError::Unavailable`] when no key is configured.
#[derive(Clone)]
pub struct SerpApiEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    num_results: usize,
    max_related_topics: usize,
}

impl SerpApiEngine {
    pub fn new(client: reqwest::Client, config: &SearchConfig, capabilities: &Capabilities) -> Self {
        Self {
            client,
            endpoint: config.serpapi_url.clone(),
            api_key: capabilities.serpapi_key().map(str::to_string),
            num_results: config.serpapi_results,
            max_related_topics: config.max_related_topics,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

impl std::fmt::Debug for SerpApiEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpApiEngine")
            .field("endpoint", &self.endpoint)
            .field("has_credential", &self.has_credential())
            .finish()
    }
}

impl ResearchEngine for SerpApiEngine {
    async fn attempt(&self, query: &SearchQuery) -> Result<Option<SearchResult>, SearchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SearchError::Unavailable(format!("{SERPAPI_KEY_ENV} not set")));
        };

        tracing::trace!(query = query.text(), "SerpAPI search");

        let num = self.num_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("engine", "google"),
                ("q", query.text()),
                ("num", num.as_str()),
                ("hl", "en"),
                ("api_key", api_key),
            ])
            .send()
            .await
            .map_err(|e| http::classify("SerpAPI", e.without_url()))?
            .error_for_status()
            .map_err(|e| http::classify("SerpAPI", e.without_url()))?;

        let body = response
            .text()
            .await
            .map_err(|e| http::classify("SerpAPI", e.without_url()))?;

        tracing::trace!(bytes = body.len(), "SerpAPI response received");

        parse_serpapi(&body, self.max_related_topics)
    }

    fn kind(&self) -> EngineKind {
        EngineKind::SerpApi
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SerpResponse {
    error: Option<String>,
    answer_box: Option<AnswerBox>,
    #[serde(deserialize_with = "null_as_empty")]
    organic_results: Vec<OrganicResult>,
    #[serde(deserialize_with = "null_as_empty")]
    related_searches: Vec<RelatedSearch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnswerBox {
    answer: Option<String>,
    snippet: Option<String>,
    link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RelatedSearch {
    query: Option<String>,
}

/// Normalise a SerpAPI JSON body.
///
/// A body carrying an `error` field is a failure; a body with no usable
/// snippets declines with `Ok(None)`.
pub(crate) fn parse_serpapi(
    body: &str,
    max_related_topics: usize,
) -> Result<Option<SearchResult>, SearchError> {
    let data: SerpResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("SerpAPI response: {e}")))?;

    if let Some(message) = non_blank(data.error.as_deref()) {
        return Err(SearchError::Http(format!("SerpAPI error: {message}")));
    }

    let mut parts: Vec<&str> = Vec::new();
    let mut source_url = None;
    if let Some(answer_box) = &data.answer_box {
        parts.extend(non_blank(answer_box.answer.as_deref()));
        parts.extend(non_blank(answer_box.snippet.as_deref()));
        source_url = non_blank(answer_box.link.as_deref());
    }
    for result in &data.organic_results {
        parts.extend(non_blank(result.snippet.as_deref()));
    }

    if parts.is_empty() {
        tracing::debug!("SerpAPI returned no snippets");
        return Ok(None);
    }

    let source_url = source_url
        .or_else(|| data.organic_results.iter().find_map(|r| non_blank(r.link.as_deref())))
        .map(str::to_string);

    let mut related_topics: Vec<String> = data
        .related_searches
        .iter()
        .filter_map(|r| non_blank(r.query.as_deref()))
        .map(str::to_string)
        .collect();
    if related_topics.is_empty() {
        related_topics = data
            .organic_results
            .iter()
            .filter_map(|r| non_blank(r.title.as_deref()))
            .map(str::to_string)
            .collect();
    }
    related_topics.truncate(max_related_topics);

    tracing::debug!(
        organic = data.organic_results.len(),
        related = related_topics.len(),
        "SerpAPI results parsed"
    );

    Ok(Some(SearchResult::new(
        EngineKind::SerpApi,
        parts.join("\n"),
        source_url,
        related_topics,
    )))
}
