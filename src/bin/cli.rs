//! Link resolver CLI
//!
//! Resolves media post URLs and prints the download links as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use futures::stream::{self, StreamExt};
use linkresolver::{
    error::Result,
    models::{Config, LinkRequest},
    services::{LinkResolver, PatternMatcher},
};
use serde_json::{Map, Value, json};

/// linkresolver - media post URL resolver
#[derive(Parser, Debug)]
#[command(
    name = "linkresolver",
    version,
    about = "Resolve media post URLs into direct download links"
)]

struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve URLs into download links
    Resolve {
        /// URLs to resolve
        #[arg(required = true)]
        urls: Vec<String>,

        /// Origin identifier carried onto embedded links
        #[arg(long)]
        context: Option<String>,
    },

    /// List platform signatures in priority order
    Platforms,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Resolve every URL with bounded concurrency, keyed by input URL. Links
/// are listed sorted by URL.
async fn resolve_all(resolver: &LinkResolver, urls: Vec<String>, context: Option<String>) -> Map<String, Value> {
    let limit = resolver.config().resolver.max_concurrent.max(1);

    stream::iter(urls)
        .map(|url| {
            let request = LinkRequest::with_context(url.as_str(), context.clone());
            async move {
                let outcome = match resolver.resolve(&request).await {
                    Ok(links) => {
                        log::info!("{} -> {} link(s)", url, links.len());
                        json!({ "links": links.into_links() })
                    }
                    Err(e) => {
                        log::warn!("Failed to resolve {}: {}", url, e);
                        json!({
                            "error": e.to_string(),
                            "kind": format!("{:?}", e.kind()),
                            "retryable": e.is_retryable(),
                        })
                    }
                };
                (url, outcome)
            }
        })
        .buffer_unordered(limit)
        .collect()
        .await
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Resolve { urls, context } => {
            let config = Arc::new(Config::load_or_default(&cli.config));
            config.validate()?;
            let resolver = LinkResolver::from_config(config)?;

            log::debug!("Resolving {} URL(s)", urls.len());
            let results = resolve_all(&resolver, urls, context).await;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }

        Command::Platforms => {
            let config = Config::load_or_default(&cli.config);
            let matcher = PatternMatcher::new(config.resolver.tistory_sites);

            for (i, signature) in matcher.signatures().enumerate() {
                let configured = config.credentials.is_configured(signature.platform);
                println!(
                    "{:>2}. {:<20} {}{}",
                    i + 1,
                    signature.platform,
                    signature.pattern.as_str(),
                    if configured { "" } else { "  (credentials missing)" }
                );
            }
        }

        Command::Validate => {
            log::info!("Validating {}...", cli.config.display());

            let config = Config::load(&cli.config)?;
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
