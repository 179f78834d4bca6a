// InnerSource repository crawler CLI.
//
// Crawls GitHub for repositories matching the given query, scores each one,
// and prints the ranked list as JSON on stdout.

mod cli;

use anyhow::Result;
use clap::Parser;

use ghcrawl::{
    CrawlConfig, CrawlQuery, MetadataIndex, TOKEN_ENV_KEY, crawl_repositories_with_config,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = rustls::crypto::ring::default_provider().install_default();

    env_logger::init();

    let cli = cli::Cli::parse();

    let token = std::env::var(TOKEN_ENV_KEY).unwrap_or_default();

    let listing = match &cli.listing {
        Some(path) => MetadataIndex::load(path).await?,
        None => MetadataIndex::new(),
    };

    let query = CrawlQuery {
        user: cli.user,
        organizations: cli.orgs,
        topics: cli.topics,
        visibility: cli.visibility.into(),
    };

    let config = CrawlConfig {
        max_results: cli.max_results,
        score_mode: cli.scoring.into(),
        ..CrawlConfig::default()
    };

    let output = crawl_repositories_with_config(&token, query, config, listing).await?;

    println!("{}", serde_json::to_string(&output)?);

    Ok(())
}
