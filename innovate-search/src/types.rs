//! Core types: engine identifiers, queries, and normalised results.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backends the resolver knows how to attempt.
///
/// Declaration order is the default priority order.
///
/// Serialised names must stay in step with [`EngineKind::name`]; config
/// files and `engine_used` in JSON output both use them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineKind {
    /// DuckDuckGo Instant Answer API: definitions and abstracts.
    #[serde(rename = "duckduckgo_instant")]
    DuckDuckGoInstant,
    /// Locally synthesised web-search style results.
    #[serde(rename = "duckduckgo_web")]
    DuckDuckGoWeb,
    /// SerpAPI Google search, requires an API key.
    #[serde(rename = "serpapi")]
    SerpApi,
    /// Offline template filler. Never fails.
    #[serde(rename = "mock")]
    Mock,
}

impl EngineKind {
    /// Returns the stable identifier used in results, logs, and config files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGoInstant => "duckduckgo_instant",
            Self::DuckDuckGoWeb => "duckduckgo_web",
            Self::SerpApi => "serpapi",
            Self::Mock => "mock",
        }
    }

    /// Returns all engines in default priority order.
    pub fn default_order() -> &'static [EngineKind] {
        &[
            Self::DuckDuckGoInstant,
            Self::DuckDuckGoWeb,
            Self::SerpApi,
            Self::Mock,
        ]
    }

    /// Whether the engine talks to a remote service.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::DuckDuckGoInstant | Self::SerpApi)
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Caller hint for which engine to try first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnginePreference {
    /// Use the default priority order.
    #[default]
    Auto,
    /// Try this engine first, then the rest in default order.
    Engine(EngineKind),
}

impl EnginePreference {
    /// The preferred engine, if any.
    pub fn engine(&self) -> Option<EngineKind> {
        match self {
            Self::Auto => None,
            Self::Engine(kind) => Some(*kind),
        }
    }
}

impl FromStr for EnginePreference {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "duckduckgo" | "duckduckgo_instant" => Ok(Self::Engine(EngineKind::DuckDuckGoInstant)),
            "duckduckgo_web" => Ok(Self::Engine(EngineKind::DuckDuckGoWeb)),
            "serpapi" => Ok(Self::Engine(EngineKind::SerpApi)),
            "mock" => Ok(Self::Engine(EngineKind::Mock)),
            other => Err(SearchError::Config(format!("unknown search engine: {other}"))),
        }
    }
}

impl fmt::Display for EnginePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Engine(kind) => kind.fmt(f),
        }
    }
}

/// What the research will feed into. Only the mock engine varies its output by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    BlogPost,
    SocialMedia,
    WebsiteCopy,
    EmailCampaign,
    CaseStudy,
    Whitepaper,
}

impl ContentType {
    /// Returns the snake_case identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BlogPost => "blog_post",
            Self::SocialMedia => "social_media",
            Self::WebsiteCopy => "website_copy",
            Self::EmailCampaign => "email_campaign",
            Self::CaseStudy => "case_study",
            Self::Whitepaper => "whitepaper",
        }
    }

    /// Returns all content types.
    pub fn all() -> &'static [ContentType] {
        &[
            Self::BlogPost,
            Self::SocialMedia,
            Self::WebsiteCopy,
            Self::EmailCampaign,
            Self::CaseStudy,
            Self::Whitepaper,
        ]
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContentType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::all()
            .iter()
            .copied()
            .find(|ct| ct.name() == wanted)
            .ok_or_else(|| SearchError::Config(format!("unknown content type: {s}")))
    }
}

/// A validated research query.
///
/// The text is stored trimmed and is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    preference: EnginePreference,
    content_type: ContentType,
}

impl SearchQuery {
    /// Build a query with no engine preference and the default content type.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] if `text` is empty after trimming.
    pub fn new(text: &str) -> Result<Self, SearchError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SearchError::InvalidQuery("query must not be empty".into()));
        }
        Ok(Self {
            text: trimmed.to_string(),
            preference: EnginePreference::Auto,
            content_type: ContentType::default(),
        })
    }

    pub fn with_preference(mut self, preference: EnginePreference) -> Self {
        self.preference = preference;
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn preference(&self) -> EnginePreference {
        self.preference
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Lower-cased words of the query with punctuation stripped.
    pub fn keywords(&self) -> Vec<String> {
        self.text
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect()
    }
}

/// A normalised research result, whichever engine produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The engine that satisfied the query.
    pub engine_used: EngineKind,
    /// Plain-text synthesised answer or snippet.
    pub summary: String,
    /// Attribution link, when the engine has one.
    pub source_url: Option<String>,
    /// Short related snippets in engine order.
    pub related_topics: Vec<String>,
    /// Word count of `summary`, for logging only.
    pub raw_word_count: usize,
}

impl SearchResult {
    /// Build a result, deriving `raw_word_count` from the summary.
    pub fn new(
        engine_used: EngineKind,
        summary: String,
        source_url: Option<String>,
        related_topics: Vec<String>,
    ) -> Self {
        let raw_word_count = summary.split_whitespace().count();
        Self {
            engine_used,
            summary,
            source_url,
            related_topics,
            raw_word_count,
        }
    }

    /// Whether the summary carries any text.
    pub fn has_summary(&self) -> bool {
        !self.summary.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_names_are_snake_case() {
        assert_eq!(EngineKind::DuckDuckGoInstant.to_string(), "duckduckgo_instant");
        assert_eq!(EngineKind::DuckDuckGoWeb.to_string(), "duckduckgo_web");
        assert_eq!(EngineKind::SerpApi.to_string(), "serpapi");
        assert_eq!(EngineKind::Mock.to_string(), "mock");
    }

    #[test]
    fn engine_serde_matches_name() {
        for kind in EngineKind::default_order() {
            let json = serde_json::to_string(kind).expect("serialize");
            assert_eq!(json, format!("\"{}\"", kind.name()));
            let back: EngineKind = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, *kind);
        }
    }

    #[test]
    fn result_json_uses_engine_name() {
        let result = SearchResult::new(
            EngineKind::DuckDuckGoInstant,
            "Machine learning learns from data.".into(),
            None,
            vec![],
        );
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["engine_used"], "duckduckgo_instant");

        let engines: Vec<EngineKind> =
            serde_json::from_str(r#"["duckduckgo_web", "serpapi"]"#).expect("deserialize");
        assert_eq!(engines, vec![EngineKind::DuckDuckGoWeb, EngineKind::SerpApi]);
        assert!(serde_json::from_str::<EngineKind>("\"serp_api\"").is_err());
    }

    #[test]
    fn default_order_ends_with_mock() {
        let order = EngineKind::default_order();
        assert_eq!(order.first(), Some(&EngineKind::DuckDuckGoInstant));
        assert_eq!(order.last(), Some(&EngineKind::Mock));
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn remote_engines() {
        assert!(EngineKind::DuckDuckGoInstant.is_remote());
        assert!(EngineKind::SerpApi.is_remote());
        assert!(!EngineKind::DuckDuckGoWeb.is_remote());
        assert!(!EngineKind::Mock.is_remote());
    }

    #[test]
    fn preference_parses_aliases() {
        assert_eq!("auto".parse::<EnginePreference>().ok(), Some(EnginePreference::Auto));
        assert_eq!(
            "DuckDuckGo".parse::<EnginePreference>().ok(),
            Some(EnginePreference::Engine(EngineKind::DuckDuckGoInstant))
        );
        assert_eq!(
            "duckduckgo_web".parse::<EnginePreference>().ok(),
            Some(EnginePreference::Engine(EngineKind::DuckDuckGoWeb))
        );
        assert_eq!(
            " serpapi ".parse::<EnginePreference>().ok(),
            Some(EnginePreference::Engine(EngineKind::SerpApi))
        );
        assert_eq!(
            "mock".parse::<EnginePreference>().ok(),
            Some(EnginePreference::Engine(EngineKind::Mock))
        );
    }

    #[test]
    fn preference_rejects_unknown() {
        let err = "bing".parse::<EnginePreference>().unwrap_err();
        assert!(err.to_string().contains("unknown search engine"));
    }

    #[test]
    fn content_type_parses_loosely() {
        assert_eq!("blog_post".parse::<ContentType>().ok(), Some(ContentType::BlogPost));
        assert_eq!("Social Media".parse::<ContentType>().ok(), Some(ContentType::SocialMedia));
        assert_eq!("case-study".parse::<ContentType>().ok(), Some(ContentType::CaseStudy));
        assert!("podcast".parse::<ContentType>().is_err());
    }

    #[test]
    fn query_is_trimmed() {
        let q = SearchQuery::new("  machine learning \n").expect("valid");
        assert_eq!(q.text(), "machine learning");
        assert_eq!(q.preference(), EnginePreference::Auto);
        assert_eq!(q.content_type(), ContentType::BlogPost);
    }

    #[test]
    fn empty_and_whitespace_queries_rejected() {
        for text in ["", "   ", "\t\n"] {
            let err = SearchQuery::new(text).unwrap_err();
            assert!(matches!(err, SearchError::InvalidQuery(_)));
        }
    }

    #[test]
    fn keywords_strip_punctuation() {
        let q = SearchQuery::new("What is AI, really?").expect("valid");
        assert_eq!(q.keywords(), vec!["what", "is", "ai", "really"]);
    }

    #[test]
    fn result_counts_words() {
        let r = SearchResult::new(
            EngineKind::Mock,
            "one two  three\nfour".into(),
            None,
            vec![],
        );
        assert_eq!(r.raw_word_count, 4);
        assert!(r.has_summary());
    }

    #[test]
    fn blank_summary_is_not_a_summary() {
        let r = SearchResult::new(EngineKind::DuckDuckGoInstant, "  ".into(), None, vec![]);
        assert_eq!(r.raw_word_count, 0);
        assert!(!r.has_summary());
    }
}
