//! CLI for the research stage.
//!
//! Tracing goes to stderr so `--json` output on stdout stays machine-readable.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use innovate::{Capabilities, ContentType, EnginePreference, InnovateConfig, ResearchStage};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "innovate=info,innovate_search=info";

/// Load `.env` (from `path`, or the working directory), then build the log
/// filter. `.env` may set `RUST_LOG`, so the filter is read afterwards.
fn load_environment(path: Option<&Path>) -> (Result<PathBuf, dotenvy::Error>, EnvFilter) {
    let loaded = match path {
        Some(p) => dotenvy::from_path(p).map(|()| p.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    (loaded, filter)
}

/// Innovate research: resolve a topic through the search fallback chain.
#[derive(Parser)]
#[command(name = "innovate-research", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, env = "INNOVATE_CONFIG")]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Research a topic.
    Search {
        /// The topic or question to research.
        query: String,

        /// Engine to try first: auto, duckduckgo, duckduckgo_web, serpapi, mock.
        #[arg(short, long)]
        engine: Option<EnginePreference>,

        /// Content type the research is for, e.g. blog_post or social_media.
        #[arg(short = 't', long)]
        content_type: Option<ContentType>,

        /// Print the raw result as JSON instead of the prompt brief.
        #[arg(long)]
        json: bool,
    },

    /// List engines usable with the current configuration and credentials.
    Engines,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (dotenv, filter) = load_environment(None);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }

    let cli = Cli::parse();

    let config = InnovateConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let capabilities = Capabilities::from_env();
    let stage = ResearchStage::new(&config.research, capabilities)?;

    match cli.command {
        Command::Search {
            query,
            engine,
            content_type,
            json,
        } => {
            let brief = stage.run(&query, content_type, engine).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&brief.result)?);
            } else {
                print!("{}", brief.to_prompt_context());
            }
        }
        Command::Engines => {
            for engine in stage.available_engines() {
                println!("{engine}");
            }
        }
    }

    Ok(())
}
