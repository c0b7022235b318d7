//! Innovate: research stage of a multi-stage content-creation pipeline.
//!
//! The pipeline runs strategy → research → keywords → writing → SEO → QA →
//! packaging. This crate owns the research step: it resolves a topic to a
//! [`ResearchBrief`] through [`innovate_search`]'s fallback chain and
//! renders it for the prompt templates of the later stages.
//!
//! # Architecture
//!
//! - **Config**: TOML file with a `[research]` section, defaults for every field
//! - **Capabilities**: API keys read once from the environment (`.env` supported by the CLI)
//! - **Research stage**: one long-lived resolver shared by every pipeline run

pub mod config;
pub mod error;
pub mod research;

pub use config::{InnovateConfig, ResearchConfig};
pub use error::{InnovateError, Result};
pub use innovate_search::{Capabilities, ContentType, EngineKind, EnginePreference, SearchResult};
pub use research::{ResearchBrief, ResearchStage};
