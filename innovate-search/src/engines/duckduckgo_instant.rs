//! DuckDuckGo Instant Answer backend.
//!
//! Queries the JSON Instant Answer API (`api.duckduckgo.com/?format=json`),
//! which returns abstracts, definitions and related topics rather than a
//! list of ranked links. Most queries return an empty abstract, in which
//! case this engine declines and the resolver moves on.

use crate::config::SearchConfig;
use crate::engine::ResearchEngine;
use crate::error::SearchError;
use crate::http;
use crate::text::{non_blank, null_as_empty};
use crate::types::{EngineKind, SearchQuery, SearchResult};
use serde::Deserialize;

/// Instant Answer API client.
#[derive(Debug, Clone)]
pub struct DuckDuckGoInstantEngine {
    client: reqwest::Client,
    endpoint: String,
    max_related_topics: usize,
}

impl DuckDuckGoInstantEngine {
    pub fn new(client: reqwest::Client, config: &SearchConfig) -> Self {
        Self {
            client,
            endpoint: config.instant_answer_url.clone(),
            max_related_topics: config.max_related_topics,
        }
    }
}

impl ResearchEngine for DuckDuckGoInstantEngine {
    async fn attempt(&self, query: &SearchQuery) -> Result<Option<SearchResult>, SearchError> {
        tracing::trace!(query = query.text(), "DuckDuckGo instant answer lookup");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query.text()),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
                ("no_redirect", "1"),
            ])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| http::classify("DuckDuckGo instant", e))?
            .error_for_status()
            .map_err(|e| http::classify("DuckDuckGo instant", e))?;

        // The API answers with `application/x-javascript`, so decode the body by hand.
        let body = response
            .text()
            .await
            .map_err(|e| http::classify("DuckDuckGo instant", e))?;

        tracing::trace!(bytes = body.len(), "DuckDuckGo instant response received");

        parse_instant_answer(&body, self.max_related_topics)
    }

    fn kind(&self) -> EngineKind {
        EngineKind::DuckDuckGoInstant
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InstantAnswer {
    #[serde(rename = "Abstract")]
    abstract_text: Option<String>,
    #[serde(rename = "AbstractText")]
    abstract_plain: Option<String>,
    #[serde(rename = "AbstractURL")]
    abstract_url: Option<String>,
    #[serde(rename = "Definition")]
    definition: Option<String>,
    #[serde(rename = "DefinitionURL")]
    definition_url: Option<String>,
    // A string for calculators and conversions, an object for richer answers.
    #[serde(rename = "Answer")]
    answer: serde_json::Value,
    #[serde(rename = "RelatedTopics", deserialize_with = "null_as_empty")]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RelatedTopic {
    #[serde(rename = "Text")]
    text: Option<String>,
    // Present on category groups instead of `Text`.
    #[serde(rename = "Topics", deserialize_with = "null_as_empty")]
    topics: Vec<RelatedTopic>,
}

fn collect_topics(topics: &[RelatedTopic], limit: usize, out: &mut Vec<String>) {
    for topic in topics {
        if out.len() >= limit {
            return;
        }
        if let Some(text) = non_blank(topic.text.as_deref()) {
            out.push(text.to_string());
        }
        collect_topics(&topic.topics, limit, out);
    }
}

/// Normalise an Instant Answer JSON body.
///
/// Returns `Ok(None)` when neither an abstract nor a definition is present.
/// Extracted as a separate function for testability with canned JSON.
pub(crate) fn parse_instant_answer(
    body: &str,
    max_related_topics: usize,
) -> Result<Option<SearchResult>, SearchError> {
    let data: InstantAnswer = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("DuckDuckGo instant answer: {e}")))?;

    let abstract_text = non_blank(data.abstract_text.as_deref())
        .or_else(|| non_blank(data.abstract_plain.as_deref()));
    let definition = non_blank(data.definition.as_deref());

    if abstract_text.is_none() && definition.is_none() {
        tracing::debug!("DuckDuckGo instant answer had no abstract or definition");
        return Ok(None);
    }

    let answer = non_blank(data.answer.as_str());
    let summary = [abstract_text, definition, answer]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n");

    let source_url = non_blank(data.abstract_url.as_deref())
        .or_else(|| non_blank(data.definition_url.as_deref()))
        .map(str::to_string);

    let mut related_topics = Vec::new();
    collect_topics(&data.related_topics, max_related_topics, &mut related_topics);

    tracing::debug!(
        related = related_topics.len(),
        has_source = source_url.is_some(),
        "DuckDuckGo instant answer parsed"
    );

    Ok(Some(SearchResult::new(
        EngineKind::DuckDuckGoInstant,
        summary,
        source_url,
        related_topics,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MACHINE_LEARNING_JSON: &str = r#"{
        "Abstract": "Machine learning is a field of study in artificial intelligence concerned with statistical algorithms that learn from data.",
        "AbstractText": "Machine learning is a field of study in artificial intelligence concerned with statistical algorithms that learn from data.",
        "AbstractURL": "https://en.wikipedia.org/wiki/Machine_learning",
        "AbstractSource": "Wikipedia",
        "Answer": "",
        "Definition": "",
        "DefinitionURL": "",
        "Heading": "Machine learning",
        "RelatedTopics": [
            {"FirstURL": "https://duckduckgo.com/Deep_learning", "Text": "Deep learning - A subset of machine learning."},
            {"FirstURL": "https://duckduckgo.com/Supervised_learning", "Text": "Supervised learning - Learning from labelled data."},
            {
                "Name": "See also",
                "Topics": [
                    {"FirstURL": "https://duckduckgo.com/Data_mining", "Text": "Data mining"},
                    {"FirstURL": "https://duckduckgo.com/Statistics", "Text": "Statistics"}
                ]
            },
            {"FirstURL": "https://duckduckgo.com/Neural_network", "Text": "Neural network"},
            {"FirstURL": "https://duckduckgo.com/Reinforcement_learning", "Text": "Reinforcement learning"}
        ],
        "Type": "A"
    }"#;

    const EMPTY_JSON: &str = r#"{
        "Abstract": "",
        "AbstractURL": "",
        "Answer": "",
        "Definition": "",
        "RelatedTopics": [],
        "Type": ""
    }"#;

    #[test]
    fn parse_abstract_answer() {
        let result = parse_instant_answer(MACHINE_LEARNING_JSON, 5)
            .expect("should parse")
            .expect("should answer");
        assert_eq!(result.engine_used, EngineKind::DuckDuckGoInstant);
        assert!(result.summary.starts_with("Machine learning is a field"));
        assert_eq!(
            result.source_url.as_deref(),
            Some("https://en.wikipedia.org/wiki/Machine_learning")
        );
        assert!(result.raw_word_count > 10);
    }

    #[test]
    fn related_topics_flatten_groups_in_order() {
        let result = parse_instant_answer(MACHINE_LEARNING_JSON, 10)
            .expect("should parse")
            .expect("should answer");
        assert_eq!(
            result.related_topics,
            vec![
                "Deep learning - A subset of machine learning.",
                "Supervised learning - Learning from labelled data.",
                "Data mining",
                "Statistics",
                "Neural network",
                "Reinforcement learning",
            ]
        );
    }

    #[test]
    fn related_topics_are_capped() {
        let result = parse_instant_answer(MACHINE_LEARNING_JSON, 3)
            .expect("should parse")
            .expect("should answer");
        assert_eq!(result.related_topics.len(), 3);
        assert_eq!(result.related_topics[2], "Data mining");
    }

    #[test]
    fn empty_abstract_declines() {
        let result = parse_instant_answer(EMPTY_JSON, 5).expect("should parse");
        assert!(result.is_none());
    }

    #[test]
    fn answer_alone_declines() {
        let body = r#"{"Abstract": "", "Definition": "", "Answer": "42"}"#;
        assert!(parse_instant_answer(body, 5).expect("should parse").is_none());
    }

    #[test]
    fn definition_counts_as_success() {
        let body = r#"{
            "Abstract": "",
            "Definition": "blockchain definition: A distributed ledger.",
            "DefinitionURL": "https://www.merriam-webster.com/dictionary/blockchain",
            "Answer": "ledger"
        }"#;
        let result = parse_instant_answer(body, 5)
            .expect("should parse")
            .expect("should answer");
        assert_eq!(
            result.summary,
            "blockchain definition: A distributed ledger.\nledger"
        );
        assert_eq!(
            result.source_url.as_deref(),
            Some("https://www.merriam-webster.com/dictionary/blockchain")
        );
        assert!(result.related_topics.is_empty());
    }

    #[test]
    fn missing_and_null_fields_tolerated() {
        let body = r#"{"Abstract": "Python is a programming language.", "AbstractURL": null}"#;
        let result = parse_instant_answer(body, 5)
            .expect("should parse")
            .expect("should answer");
        assert!(result.source_url.is_none());
        assert!(result.related_topics.is_empty());
    }

    #[test]
    fn null_related_topics_tolerated() {
        let body = r#"{
            "Abstract": "Machine learning is a field of AI.",
            "AbstractURL": "https://en.wikipedia.org/wiki/Machine_learning",
            "RelatedTopics": null
        }"#;
        let result = parse_instant_answer(body, 5)
            .expect("should parse")
            .expect("should answer");
        assert_eq!(result.summary, "Machine learning is a field of AI.");
        assert!(result.related_topics.is_empty());
    }

    #[test]
    fn null_topic_group_tolerated() {
        let body = r#"{
            "Abstract": "Machine learning is a field of AI.",
            "RelatedTopics": [
                {"Name": "See also", "Topics": null},
                {"Text": "Deep learning"}
            ]
        }"#;
        let result = parse_instant_answer(body, 5)
            .expect("should parse")
            .expect("should answer");
        assert_eq!(result.related_topics, vec!["Deep learning"]);
    }

    #[test]
    fn object_answer_ignored() {
        let body = r#"{"Abstract": "Cloud computing is on-demand IT.", "Answer": {"data": [1, 2]}}"#;
        let result = parse_instant_answer(body, 5)
            .expect("should parse")
            .expect("should answer");
        assert_eq!(result.summary, "Cloud computing is on-demand IT.");
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = parse_instant_answer("<html>blocked</html>", 5).unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DuckDuckGoInstantEngine>();
    }

    #[tokio::test]
    #[ignore] // Live test, run with `cargo test -- --ignored`
    async fn live_instant_answer() {
        let config = SearchConfig::default();
        let client = http::build_client(&config).expect("client");
        let engine = DuckDuckGoInstantEngine::new(client, &config);
        let query = SearchQuery::new("python programming language").expect("valid");
        let result = engine.attempt(&query).await.expect("live lookup should work");
        assert!(result.is_some_and(|r| r.has_summary()));
    }
}
