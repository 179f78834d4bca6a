//! GitHub API operations module
//!
//! Provides GitHub API operations using the octocrab library.

pub mod client;
pub mod crawl;
pub mod error;

// Re-export client types
pub use client::{GitHubClient, GitHubClientBuilder, TOKEN_ENV_KEY};

// Re-export error types
pub use error::{GitHubError, GitHubResult};

// Re-export crawl functionality
pub use crawl::{
    CrawlConfig, CrawlError, CrawlProvider, CrawlQuery, CrawlResult, CrawlSession, CrawlStats,
    Crawler, InnerSourceMetadata, MetadataIndex, Output, RepositorySnapshot, ScoreEngine,
    ScoreError, ScoreMode, ScoredRepository, Visibility, crawl_repositories,
    crawl_repositories_with_config,
};
