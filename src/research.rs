//! Research stage of the content pipeline.
//!
//! Wraps [`Resolver`] for the strategy/writing/SEO stages that follow it:
//! they get a [`ResearchBrief`] and embed [`ResearchBrief::to_prompt_context`]
//! in their prompt templates. Which engine answered is carried along for
//! display and logging only.

use innovate_search::{
    Capabilities, ContentType, EngineKind, EnginePreference, Resolver, SearchQuery, SearchResult,
};
use serde::Serialize;

use crate::config::ResearchConfig;
use crate::error::{InnovateError, Result};

/// Research output handed to downstream stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchBrief {
    /// The topic as the caller gave it, trimmed.
    pub topic: String,
    /// The content type the research is for.
    pub content_type: ContentType,
    /// The normalised resolver result.
    pub result: SearchResult,
}

impl ResearchBrief {
    /// Which engine answered.
    pub fn engine(&self) -> EngineKind {
        self.result.engine_used
    }

    /// Render the brief as a markdown block for prompt templates.
    pub fn to_prompt_context(&self) -> String {
        let mut out = format!(
            "## Research: {} ({})\n\nEngine: {}\n",
            self.topic, self.content_type, self.result.engine_used
        );
        if let Some(source) = &self.result.source_url {
            out.push_str(&format!("Source: {source}\n"));
        }
        out.push_str("\n### Summary\n\n");
        out.push_str(self.result.summary.trim());
        out.push('\n');
        if !self.result.related_topics.is_empty() {
            out.push_str("\n### Related topics\n\n");
            for topic in &self.result.related_topics {
                out.push_str(&format!("- {topic}\n"));
            }
        }
        out
    }
}

/// The research stage: one resolver, reused across pipeline runs.
#[derive(Debug)]
pub struct ResearchStage {
    resolver: Resolver,
    default_preference: EnginePreference,
    default_content_type: ContentType,
}

impl ResearchStage {
    /// Build the stage from file configuration and startup credentials.
    ///
    /// # Errors
    ///
    /// Returns [`InnovateError::Config`] if the configuration is invalid.
    pub fn new(config: &ResearchConfig, capabilities: Capabilities) -> Result<Self> {
        let default_preference = config.default_preference()?;
        let resolver = Resolver::new(config.search_config(), capabilities)
            .map_err(|e| InnovateError::Config(e.to_string()))?;
        Ok(Self {
            resolver,
            default_preference,
            default_content_type: config.default_content_type,
        })
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Engines usable right now, in priority order.
    pub fn available_engines(&self) -> Vec<EngineKind> {
        self.resolver.available_engines()
    }

    /// Research `topic`.
    ///
    /// `content_type` and `preference` fall back to the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns [`InnovateError::Research`] if `topic` is empty. Backend
    /// failures are absorbed by the resolver.
    pub async fn run(
        &self,
        topic: &str,
        content_type: Option<ContentType>,
        preference: Option<EnginePreference>,
    ) -> Result<ResearchBrief> {
        let content_type = content_type.unwrap_or(self.default_content_type);
        let preference = preference.unwrap_or(self.default_preference);
        let query = SearchQuery::new(topic)?
            .with_content_type(content_type)
            .with_preference(preference);

        let result = self.resolver.resolve_query(&query).await;

        tracing::info!(
            engine = %result.engine_used,
            content_type = %content_type,
            words = result.raw_word_count,
            has_source = result.source_url.is_some(),
            "research stage complete"
        );

        Ok(ResearchBrief {
            topic: query.text().to_string(),
            content_type,
            result,
        })
    }
}
