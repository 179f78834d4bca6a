//! GitHub Repository Crawl Operation
//!
//! This module crawls repositories matching a configured query, pairs each
//! with its curated InnerSource listing metadata, and ranks the batch by
//! activity score.

mod config;
mod convenience;
mod fetch;
mod metadata;
mod rate_limiter;
mod score;
mod types;

// Re-export public types
pub use config::CrawlConfig;
pub use convenience::{crawl_repositories, crawl_repositories_with_config};
pub use metadata::{InnerSourceMetadata, MetadataIndex};
pub use score::{ScoreEngine, ScoreError, ScoreMode};
pub use types::{
    CrawlError, CrawlQuery, CrawlResult, CrawlStats, Output, RepositorySnapshot, ScoredRepository,
    Visibility,
};

use std::{
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use chrono::Utc;
use futures::Stream;
use futures::stream::{self, StreamExt};
use log::warn;
use octocrab::models::Repository;
use tokio::sync::mpsc::Receiver;
use tokio::sync::{RwLock, Semaphore};
use tokio_stream::wrappers::ReceiverStream;

use crate::github::client::GitHubClient;
use fetch::fetch_repos;
use rate_limiter::RateLimiter;

/// Streaming crawl session
pub struct CrawlSession {
    inner: ReceiverStream<CrawlResult<Output>>,
}

impl CrawlSession {
    fn new(rx: Receiver<CrawlResult<Output>>) -> Self {
        Self {
            inner: ReceiverStream::new(rx),
        }
    }
}

impl Stream for CrawlSession {
    type Item = CrawlResult<Output>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// Crawl provider trait
pub trait CrawlProvider: Send + Sync + 'static {
    fn crawl(&self, query: CrawlQuery) -> CrawlSession;
    fn crawl_with_listing(&self, query: CrawlQuery, listing: MetadataIndex) -> CrawlSession;
}

/// Main GitHub crawl implementation
pub struct Crawler {
    client: GitHubClient,
    concurrency: Arc<Semaphore>,
    config: CrawlConfig,
    rate_limiter: Arc<RwLock<RateLimiter>>,
}

impl Crawler {
    /// Creates a new `Crawler` with the default configuration
    #[must_use]
    pub fn new(client: GitHubClient) -> Self {
        Self::with_config(client, CrawlConfig::default())
    }

    #[must_use]
    pub fn with_config(client: GitHubClient, config: CrawlConfig) -> Self {
        Self {
            client,
            concurrency: Arc::new(Semaphore::new(config.concurrency_limit)),
            config,
            rate_limiter: Arc::new(RwLock::new(RateLimiter::new())),
        }
    }

    /// Orchestrates the entire crawl operation
    async fn run_crawl(
        query: CrawlQuery,
        listing: Arc<MetadataIndex>,
        client: GitHubClient,
        concurrency: Arc<Semaphore>,
        config: CrawlConfig,
        rate_limiter: Arc<RwLock<RateLimiter>>,
    ) -> CrawlResult<Output> {
        let start_time = std::time::Instant::now();

        let search_terms = query.to_search_string()?;

        let (repos, total_results, rate_limit_remaining) =
            fetch_repos(&client, &search_terms, &config, &rate_limiter).await?;

        if repos.is_empty() {
            return Err(CrawlError::NoResults {
                query: search_terms,
            });
        }

        let top_repos = repos
            .into_iter()
            .take(config.max_results)
            .collect::<Vec<_>>();

        let (mut results, errors) =
            Self::score_all(top_repos, client, concurrency, listing, config).await?;

        // Highest score first; ties keep a stable order by full name
        results.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.full_name.cmp(&b.full_name))
        });

        let processing_time = start_time.elapsed().as_millis();

        Ok(Output {
            status: if errors.is_empty() {
                "success".to_string()
            } else {
                "partial".to_string()
            },
            results,
            metadata: CrawlStats {
                total_results,
                processing_time_ms: processing_time,
                api_rate_limit_remaining: rate_limit_remaining,
                partial_results: !errors.is_empty(),
            },
            errors,
        })
    }

    /// Scores all repositories in parallel
    async fn score_all(
        repos: Vec<Repository>,
        client: GitHubClient,
        concurrency: Arc<Semaphore>,
        listing: Arc<MetadataIndex>,
        config: CrawlConfig,
    ) -> CrawlResult<(Vec<ScoredRepository>, Vec<String>)> {
        let engine = ScoreEngine::new(config.score_mode);
        let concurrency_limit = config.concurrency_limit;

        // Create futures for parallel repository scoring
        let futures = repos.into_iter().map(|repo| {
            // Clone all shared handles for move into the async closure
            let client = client.clone();
            let concurrency = concurrency.clone();
            let listing = listing.clone();
            let config = config.clone();

            async move {
                // Acquire semaphore permit for concurrency control
                let permit = match concurrency.acquire().await {
                    Ok(p) => p,
                    Err(_) => {
                        return Err(CrawlError::Api(
                            "Concurrency limiter closed".to_string(),
                        ));
                    }
                };

                let result = score_repo(&client, repo, &listing, engine, &config).await;

                // Release permit via RAII
                drop(permit);

                result
            }
        });

        // Execute futures concurrently with bounded parallelism
        let all_results = stream::iter(futures)
            .buffer_unordered(concurrency_limit)
            .collect::<Vec<CrawlResult<ScoredRepository>>>()
            .await;

        // Partition results into successes and errors
        let mut results = Vec::new();
        let mut errors = Vec::new();

        for result in all_results {
            match result {
                Ok(scored) => results.push(scored),
                Err(e) => errors.push(e.to_string()),
            }
        }

        Ok((results, errors))
    }
}

impl CrawlProvider for Crawler {
    /// Executes a crawl with no listing; every repository scores against a
    /// default metadata record.
    fn crawl(&self, query: CrawlQuery) -> CrawlSession {
        self.crawl_with_listing(query, MetadataIndex::new())
    }

    /// Executes a crawl pairing repositories with the given listing.
    fn crawl_with_listing(&self, query: CrawlQuery, listing: MetadataIndex) -> CrawlSession {
        let (tx, rx) = tokio::sync::mpsc::channel(1);

        // Clone all necessary data for the spawned task
        let client = self.client.clone();
        let concurrency = self.concurrency.clone();
        let config = self.config.clone();
        let rate_limiter = self.rate_limiter.clone();
        let listing = Arc::new(listing);

        // Spawn async task to perform the crawl
        tokio::spawn(async move {
            let result =
                Self::run_crawl(query, listing, client, concurrency, config, rate_limiter).await;

            // Send the result through the channel (ignore send errors if receiver dropped)
            let _ = tx.send(result).await;
        });

        CrawlSession::new(rx)
    }
}

/// Scores a single repository against its listing metadata
async fn score_repo(
    client: &GitHubClient,
    repo: Repository,
    listing: &MetadataIndex,
    engine: ScoreEngine,
    config: &CrawlConfig,
) -> CrawlResult<ScoredRepository> {
    let full_name = repo.full_name.clone().unwrap_or_else(|| repo.name.clone());

    // Search results omit subscribers_count; the full repository record has it
    let repo = match hydrate(client, &repo, config).await {
        Ok(full) => full,
        Err(e) => {
            warn!("Failed to hydrate {full_name}, scoring the search result: {e}");
            repo
        }
    };

    let snapshot = RepositorySnapshot::from(&repo);
    let mut metadata = listing.get_or_default(&full_name);

    let score = engine
        .compute(&snapshot, &mut metadata, Utc::now())
        .map_err(|source| CrawlError::Score {
            repo: full_name.clone(),
            source,
        })?;

    Ok(ScoredRepository {
        name: snapshot.name,
        full_name: snapshot.full_name,
        url: snapshot.html_url,
        description: snapshot.description.unwrap_or_default(),
        forks: snapshot.forks_count.unwrap_or_default(),
        subscribers: snapshot.subscribers_count.unwrap_or_default(),
        stargazers: snapshot.stargazers_count.unwrap_or_default(),
        open_issues: snapshot.open_issues_count.unwrap_or_default(),
        language: snapshot.language,
        topics: snapshot.topics,
        created_at: snapshot.created_at,
        updated_at: snapshot.updated_at,
        score,
        metadata,
    })
}

/// Re-fetches the full record of a search result
async fn hydrate(
    client: &GitHubClient,
    repo: &Repository,
    config: &CrawlConfig,
) -> CrawlResult<Repository> {
    let owner = repo
        .owner
        .as_ref()
        .ok_or_else(|| CrawlError::InvalidQuery {
            details: format!("repository '{}' has no owner information", repo.name),
        })?
        .login
        .clone();

    let fetch_future = client.get_repository(owner, repo.name.clone());

    tokio::time::timeout(config.api_timeout, fetch_future)
        .await
        .map_err(|_| CrawlError::Timeout {
            operation: "repository_get".to_string(),
            duration: config.api_timeout,
        })?
        .map_err(|e| CrawlError::Api(e.to_string()))
}
