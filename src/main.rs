//! Wikifold command-line entry point
//!
//! A thin inspection tool around the library: resolves a topic and prints
//! the merged JSON result to stdout.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wikifold::config::Config;
use wikifold::{build_http_client, find_wikidata_item, get_article_content};

/// Wikifold: Wikipedia content resolution for embedding
///
/// Resolves a topic in the given language edition to its Wikidata item id
/// and a cleaned pair of HTML fragments (lead excerpt and remaining
/// sections), printed as JSON.
#[derive(Parser, Debug)]
#[command(name = "wikifold")]
#[command(version)]
#[command(about = "Resolve a Wikipedia topic to embeddable content", long_about = None)]
struct Cli {
    /// Language edition code (e.g. "en", "fi")
    #[arg(value_name = "LANGUAGE")]
    language: String,

    /// Article title to resolve
    #[arg(value_name = "TOPIC")]
    topic: String,

    /// Only resolve the Wikidata item id, skip content fetching
    #[arg(long, conflicts_with = "skip_identifier")]
    identifier_only: bool,

    /// Only fetch content, skip the Wikidata lookup
    #[arg(long, conflicts_with = "identifier_only")]
    skip_identifier: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = Config::from_env().context("failed to load configuration")?;
    let client = build_http_client(&config).context("failed to build HTTP client")?;

    let wikidata_item = if cli.skip_identifier {
        None
    } else {
        find_wikidata_item(&client, &config, &cli.language, &cli.topic)
            .await
            .context("wikidata lookup failed")?
    };

    if cli.identifier_only {
        let output = serde_json::json!({ "wikidata_item": wikidata_item });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let content = get_article_content(&client, &config, &cli.language, &cli.topic).await;

    let output = serde_json::json!({
        "wikidata_item": wikidata_item,
        "summary": content.summary,
        "excerpt_html": content.excerpt_html,
        "remaining_html": content.remaining_html,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wikifold=info,warn"),
            1 => EnvFilter::new("wikifold=debug,info"),
            2 => EnvFilter::new("wikifold=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
