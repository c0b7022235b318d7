//! Simulated DuckDuckGo web search.
//!
//! No page is fetched. The engine synthesises three to five web-result
//! style snippets from the query keywords so the research stage has
//! something plausible to work with when the instant answer API is empty.
//! Output is a pure function of the normalised query: the RNG is seeded
//! from a BLAKE3 hash of it.

use crate::engine::ResearchEngine;
use crate::error::SearchError;
use crate::text::title_case;
use crate::types::{EngineKind, SearchQuery, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "for", "how", "in", "is", "of", "on", "or", "the", "to", "what",
    "why", "with",
];

struct Template {
    title: &'static str,
    snippet: &'static str,
}

// `{t}` is the title-cased focus phrase, `{q}` the lower-case one and
// `{a}`..`{c}` are filled from the matching word pools below.
const TEMPLATES: &[Template] = &[
    Template {
        title: "Latest Research on {t}: {a}",
        snippet: "A {b} of {q} points to {c} across the sector, with adoption moving from pilots to production.",
    },
    Template {
        title: "{t} Implementation Guide",
        snippet: "Practical lessons on {q} from {b}, covering {c} and the pitfalls teams hit in the first year.",
    },
    Template {
        title: "{t} Market Trends and {a}",
        snippet: "Analysts tracking {q} report {c}; budgets are shifting toward measurable, automation-first projects.",
    },
    Template {
        title: "Technology and Innovation in {t}",
        snippet: "How {b} are applying new tooling to {q}, and why {c} is changing buying decisions.",
    },
    Template {
        title: "Expert Insights: {t} {a}",
        snippet: "Practitioners share how they approach {q}, from first experiments to {c} at scale.",
    },
    Template {
        title: "{t} for Small Businesses",
        snippet: "A plain-language overview of {q} for small teams: costs, quick wins, and where {c} shows up first.",
    },
];

const POOL_A: &[&str] = &["2024 Report", "Industry Analysis", "Outlook", "Best Practices", "Forecast"];
const POOL_B: &[&str] = &["market study", "survey of industry leaders", "review of case studies", "practitioner panel"];
const POOL_C: &[&str] = &["steady growth", "emerging opportunities", "rising investment", "clear ROI gains", "rapid adoption"];

/// Offline web-search simulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuckDuckGoWebEngine {
    max_related_topics: usize,
}

impl DuckDuckGoWebEngine {
    pub fn new(max_related_topics: usize) -> Self {
        Self { max_related_topics }
    }

    /// Build the simulated result. Never empty.
    pub fn synthesize(&self, query: &SearchQuery) -> SearchResult {
        let focus = focus_phrase(query);
        let heading = title_case(&focus);
        let mut rng = StdRng::seed_from_u64(seed_for(query));

        let count = rng.gen_range(3..=5);
        let picked: Vec<&Template> = TEMPLATES.choose_multiple(&mut rng, count).collect();

        let mut lines = Vec::with_capacity(picked.len());
        let mut titles = Vec::with_capacity(picked.len());
        for template in picked {
            let a = POOL_A.choose(&mut rng).copied().unwrap_or_default();
            let b = POOL_B.choose(&mut rng).copied().unwrap_or_default();
            let c = POOL_C.choose(&mut rng).copied().unwrap_or_default();
            let fill = |s: &str| {
                s.replace("{t}", &heading)
                    .replace("{q}", &focus)
                    .replace("{a}", a)
                    .replace("{b}", b)
                    .replace("{c}", c)
            };
            let title = fill(template.title);
            lines.push(format!("{title}. {}", fill(template.snippet)));
            titles.push(title);
        }
        titles.truncate(self.max_related_topics.max(1));

        SearchResult::new(EngineKind::DuckDuckGoWeb, lines.join("\n"), None, titles)
    }
}

impl ResearchEngine for DuckDuckGoWebEngine {
    async fn attempt(&self, query: &SearchQuery) -> Result<Option<SearchResult>, SearchError> {
        tracing::trace!(query = query.text(), "simulated web search");
        Ok(Some(self.synthesize(query)))
    }

    fn kind(&self) -> EngineKind {
        EngineKind::DuckDuckGoWeb
    }
}

/// Query keywords minus stop words; the full keyword list if nothing survives.
fn focus_phrase(query: &SearchQuery) -> String {
    let keywords = query.keywords();
    let meaningful: Vec<&str> = keywords
        .iter()
        .map(String::as_str)
        .filter(|w| !STOP_WORDS.contains(w))
        .collect();
    if meaningful.is_empty() {
        if keywords.is_empty() {
            query.text().to_lowercase()
        } else {
            keywords.join(" ")
        }
    } else {
        meaningful.join(" ")
    }
}

fn seed_for(query: &SearchQuery) -> u64 {
    let normalised = query.keywords().join(" ");
    let hash = blake3::hash(normalised.as_bytes());
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(seed)
}
