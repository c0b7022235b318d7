//! Offline research generator, the final step of every fallback chain.
//!
//! Fills fixed templates with the query text. The framing line and the
//! choice of research angles depend on the [`ContentType`] the research
//! is for. There is no randomness and no I/O, so the output for a given
//! query and content type never changes.

use crate::engine::ResearchEngine;
use crate::error::SearchError;
use crate::text::title_case;
use crate::types::{ContentType, EngineKind, SearchQuery, SearchResult};

struct Angle {
    title: &'static str,
    snippet: &'static str,
}

static ANALYSIS: Angle = Angle {
    title: "Comprehensive Analysis: {t}",
    snippet: "In-depth look at {q} covering market trends, industry insights, and strategic implications.",
};
static INDUSTRY_REPORT: Angle = Angle {
    title: "{t}: Industry Report",
    snippet: "Market size, growth projections, and the competitive landscape for {q}.",
};
static IMPLEMENTATION: Angle = Angle {
    title: "Implementation Guide for {t}",
    snippet: "Step-by-step approach to {q} with proven strategies and expert recommendations.",
};
static INNOVATION: Angle = Angle {
    title: "{t} Technology and Innovation Trends",
    snippet: "Emerging technologies and likely disruptions in the {q} space.",
};
static CASE_STUDIES: Angle = Angle {
    title: "Case Studies: {t} in Practice",
    snippet: "Real-world {q} deployments across industries, with lessons learned and ROI figures.",
};
static AUDIENCE: Angle = Angle {
    title: "What Buyers Ask About {t}",
    snippet: "Common questions, objections, and decision criteria customers raise about {q}.",
};

impl ContentType {
    fn angles(&self) -> [&'static Angle; 4] {
        match self {
            Self::BlogPost => [&ANALYSIS, &INNOVATION, &IMPLEMENTATION, &CASE_STUDIES],
            Self::SocialMedia => [&INNOVATION, &AUDIENCE, &CASE_STUDIES, &ANALYSIS],
            Self::WebsiteCopy => [&AUDIENCE, &CASE_STUDIES, &IMPLEMENTATION, &ANALYSIS],
            Self::EmailCampaign => [&AUDIENCE, &CASE_STUDIES, &INNOVATION, &IMPLEMENTATION],
            Self::CaseStudy => [&CASE_STUDIES, &IMPLEMENTATION, &INDUSTRY_REPORT, &AUDIENCE],
            Self::Whitepaper => [&INDUSTRY_REPORT, &ANALYSIS, &INNOVATION, &CASE_STUDIES],
        }
    }

    fn framing(&self) -> &'static str {
        match self {
            Self::BlogPost => "Long-form angle: explain {q} with trends, a how-to section, and one worked example.",
            Self::SocialMedia => "Short-form angle: one striking fact about {q} and a question that invites replies.",
            Self::WebsiteCopy => "Conversion angle: lead with the outcome {q} delivers, then proof points.",
            Self::EmailCampaign => "Email angle: a single benefit of {q} per message with a clear call to action.",
            Self::CaseStudy => "Narrative angle: challenge, {q} solution, measurable result.",
            Self::Whitepaper => "Authority angle: market data on {q}, methodology, and recommendations.",
        }
    }
}

/// Deterministic template engine. Always answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockEngine {
    max_related_topics: usize,
}

impl MockEngine {
    pub fn new(max_related_topics: usize) -> Self {
        Self { max_related_topics }
    }

    /// Build the templated result. Infallible and never empty.
    pub fn generate(&self, query: &SearchQuery) -> SearchResult {
        let content_type = query.content_type();
        let q = query.text();
        let t = title_case(q);
        let fill = |s: &str| s.replace("{t}", &t).replace("{q}", q);

        let mut lines = vec![format!("Research notes for: {q} ({content_type})")];
        let mut titles = Vec::new();
        for angle in content_type.angles() {
            let title = fill(angle.title);
            lines.push(format!("{title}. {}", fill(angle.snippet)));
            titles.push(title);
        }
        lines.push(fill(content_type.framing()));
        titles.truncate(self.max_related_topics.max(1));

        SearchResult::new(EngineKind::Mock, lines.join("\n"), None, titles)
    }
}

impl ResearchEngine for MockEngine {
    async fn attempt(&self, query: &SearchQuery) -> Result<Option<SearchResult>, SearchError> {
        Ok(Some(self.generate(query)))
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Mock
    }
}
