//! Configuration file for the research stage.
//!
//! Stored as TOML at `~/.config/innovate/config.toml`. Every field has a
//! default, so a partial file (or no file at all) is valid. API keys are
//! not stored here; they come from the environment via
//! [`innovate_search::Capabilities`].

use innovate_search::{ContentType, EngineKind, EnginePreference, SearchConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{InnovateError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InnovateConfig {
    /// Research resolver settings.
    pub research: ResearchConfig,
}

/// Research stage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Engines allowed to run. The mock engine is always appended.
    pub engines: Vec<EngineKind>,
    /// Engine hint used when the caller gives none (`auto`, `duckduckgo`,
    /// `duckduckgo_web`, `serpapi`, `mock`).
    pub default_engine: String,
    /// Content type assumed when the caller gives none.
    pub default_content_type: ContentType,
    /// Per-engine time budget in seconds.
    pub timeout_seconds: u64,
    /// Cap on related topics kept per result.
    pub max_related_topics: usize,
    /// Organic results requested from SerpAPI.
    pub serpapi_results: usize,
    /// DuckDuckGo Instant Answer endpoint.
    pub instant_answer_url: String,
    /// SerpAPI endpoint.
    pub serpapi_url: String,
    /// Fixed User-Agent (None = rotate).
    pub user_agent: Option<String>,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        let search = SearchConfig::default();
        Self {
            engines: search.engines,
            default_engine: "auto".to_string(),
            default_content_type: ContentType::default(),
            timeout_seconds: search.timeout_seconds,
            max_related_topics: search.max_related_topics,
            serpapi_results: search.serpapi_results,
            instant_answer_url: search.instant_answer_url,
            serpapi_url: search.serpapi_url,
            user_agent: search.user_agent,
        }
    }
}

impl ResearchConfig {
    /// Resolver configuration derived from these settings.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            engines: self.engines.clone(),
            timeout_seconds: self.timeout_seconds,
            max_related_topics: self.max_related_topics,
            serpapi_results: self.serpapi_results,
            instant_answer_url: self.instant_answer_url.clone(),
            serpapi_url: self.serpapi_url.clone(),
            user_agent: self.user_agent.clone(),
        }
    }

    /// Parsed `default_engine`.
    ///
    /// # Errors
    ///
    /// Returns [`InnovateError::Config`] for an unknown engine name.
    pub fn default_preference(&self) -> Result<EnginePreference> {
        self.default_engine
            .parse()
            .map_err(|e: innovate_search::SearchError| InnovateError::Config(e.to_string()))
    }
}

impl InnovateConfig {
    /// Check every field the resolver will rely on.
    ///
    /// # Errors
    ///
    /// Returns [`InnovateError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.research
            .search_config()
            .validate()
            .map_err(|e| InnovateError::Config(e.to_string()))?;
        self.research.default_preference()?;
        Ok(())
    }

    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| InnovateError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| InnovateError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from `path` if given, else from the default path if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default = Self::default_config_path();
                if default.is_file() {
                    tracing::debug!(path = %default.display(), "loading default config");
                    Self::from_file(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Returns the default config file path: `~/.config/innovate/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("innovate").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("innovate")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/innovate-config/config.toml")
        }
    }
}
