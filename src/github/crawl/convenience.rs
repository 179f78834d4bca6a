//! Convenience wrapper functions for the crawl operation

use futures::StreamExt;

use super::{
    CrawlConfig, CrawlError, CrawlProvider, CrawlQuery, CrawlResult, Crawler, MetadataIndex,
    Output,
};
use crate::github::client::GitHubClient;

/// Crawls GitHub repositories with a simple function call.
///
/// Wraps the more verbose [`Crawler`] API with an async function that
/// returns the finished output directly instead of requiring stream
/// handling. An empty token yields an unauthenticated client.
///
/// # Example
///
/// ```rust,no_run
/// use ghcrawl::{crawl_repositories, CrawlQuery};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("GITHUB_TOKEN")?;
///
///     let query = CrawlQuery {
///         organizations: vec!["acme".to_string()],
///         topics: vec!["inner-source".to_string()],
///         ..Default::default()
///     };
///
///     let output = crawl_repositories(&token, query).await?;
///
///     for repo in output.results {
///         println!("{}: {}", repo.full_name, repo.score);
///     }
///
///     Ok(())
/// }
/// ```
pub async fn crawl_repositories(token: &str, query: CrawlQuery) -> CrawlResult<Output> {
    crawl_repositories_with_config(token, query, CrawlConfig::default(), MetadataIndex::new())
        .await
}

/// Crawls GitHub repositories with a custom configuration and listing.
///
/// Like [`crawl_repositories`] but allows tuning the crawl (page size,
/// timeouts, score arithmetic) and supplying curated listing metadata to
/// pair with the results.
///
/// # Example
///
/// ```rust,no_run
/// use ghcrawl::{
///     crawl_repositories_with_config, CrawlConfig, CrawlQuery, MetadataIndex, ScoreMode,
/// };
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("GITHUB_TOKEN")?;
///
///     let query = CrawlQuery {
///         organizations: vec!["acme".to_string()],
///         ..Default::default()
///     };
///
///     let config = CrawlConfig {
///         max_results: 25,
///         score_mode: ScoreMode::RealValued,
///         ..Default::default()
///     };
///
///     let listing = MetadataIndex::load("innersource-listing.json").await?;
///     let output = crawl_repositories_with_config(&token, query, config, listing).await?;
///
///     println!("{} repositories scored", output.results.len());
///
///     Ok(())
/// }
/// ```
pub async fn crawl_repositories_with_config(
    token: &str,
    query: CrawlQuery,
    config: CrawlConfig,
    listing: MetadataIndex,
) -> CrawlResult<Output> {
    let client =
        GitHubClient::with_token(token).map_err(|e| CrawlError::Api(e.to_string()))?;
    let crawler = Crawler::with_config(client, config);

    let mut session = crawler.crawl_with_listing(query, listing);

    // Get the single result from the stream
    session
        .next()
        .await
        .ok_or_else(|| CrawlError::Api("No output from crawl".to_string()))?
}
