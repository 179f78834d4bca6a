//! Type definitions for the GitHub repository crawl

use chrono::{DateTime, Utc};
use octocrab::models::Repository;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::metadata::InnerSourceMetadata;
use super::score::ScoreError;

/// Comprehensive error handling for crawl operations
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("GitHub API error: {0}")]
    Api(String),

    #[error("Rate limit exceeded. Remaining: {remaining}, Reset time: {reset_time}")]
    RateLimitExceeded {
        remaining: u32,
        reset_time: DateTime<Utc>,
    },

    #[error("Invalid query: {details}")]
    InvalidQuery { details: String },

    #[error("No search results found for query: {query}")]
    NoResults { query: String },

    #[error("Operation timed out: {operation} after {duration:?}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    #[error("Failed to score {repo}: {source}")]
    Score { repo: String, source: ScoreError },

    #[error("Failed to read metadata listing {path}: {details}")]
    Listing { path: String, details: String },
}

pub type CrawlResult<T> = Result<T, CrawlError>;

/// Repository visibility filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Internal,
}

impl Visibility {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Internal => "internal",
        }
    }
}

/// Input query parameters for a crawl
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct CrawlQuery {
    pub user: Option<String>,
    pub organizations: Vec<String>,
    pub topics: Vec<String>,
    pub visibility: Visibility,
}

impl CrawlQuery {
    /// Renders the GitHub search qualifiers for this query.
    ///
    /// At least one of user, organization, or topic must be present; an
    /// unqualified search would walk all of GitHub.
    pub fn to_search_string(&self) -> CrawlResult<String> {
        if self.user.is_none() && self.organizations.is_empty() && self.topics.is_empty() {
            return Err(CrawlError::InvalidQuery {
                details: "at least one of user, organization, or topic is required".to_string(),
            });
        }

        let mut parts = Vec::new();

        if let Some(user) = &self.user {
            parts.push(format!("user:{user}"));
        }

        for org in &self.organizations {
            parts.push(format!("org:{org}"));
        }

        for topic in &self.topics {
            parts.push(format!("topic:{topic}"));
        }

        parts.push(format!("is:{}", self.visibility.as_str()));

        Ok(parts.join(" "))
    }
}

/// Read-only view of the repository statistics the score formula consumes.
///
/// Fields mirror the hosting API payload; search results leave some of them
/// unset, which the score engine reports instead of defaulting away.
#[derive(Clone, Debug, Default)]
pub struct RepositorySnapshot {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub forks_count: Option<u64>,
    pub subscribers_count: Option<u64>,
    pub stargazers_count: Option<u64>,
    pub open_issues_count: Option<u64>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl RepositorySnapshot {
    /// Opt-in consistency check for the timestamp pair.
    ///
    /// The score engine never calls this; it clamps reversed or missing
    /// timestamps instead.
    pub fn validate(&self) -> Result<(), ScoreError> {
        if let (Some(created_at), Some(updated_at)) = (self.created_at, self.updated_at) {
            if created_at > updated_at {
                return Err(ScoreError::InvalidTimestamps {
                    created_at,
                    updated_at,
                });
            }
        }
        Ok(())
    }
}

impl From<&Repository> for RepositorySnapshot {
    fn from(repo: &Repository) -> Self {
        Self {
            name: repo.name.clone(),
            full_name: repo.full_name.clone().unwrap_or_else(|| repo.name.clone()),
            html_url: repo
                .html_url
                .as_ref()
                .map_or("", reqwest::Url::as_str)
                .to_string(),
            forks_count: repo.forks_count.map(|v| v as u64),
            subscribers_count: repo.subscribers_count.map(|v| v as u64),
            stargazers_count: repo.stargazers_count.map(|v| v as u64),
            open_issues_count: repo.open_issues_count.map(|v| v as u64),
            description: repo.description.clone(),
            language: repo
                .language
                .as_ref()
                .and_then(|v| v.as_str())
                .map(std::string::ToString::to_string),
            topics: repo.topics.clone().unwrap_or_default(),
            updated_at: repo.updated_at,
            created_at: repo.created_at,
        }
    }
}

/// A scored repository, ready for the portal's repos.json
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ScoredRepository {
    pub name: String,
    pub full_name: String,
    pub url: String,
    pub description: String,
    pub forks: u64,
    pub subscribers: u64,
    pub stargazers: u64,
    pub open_issues: u64,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub score: i64,
    #[serde(rename = "_InnerSourceMetadata")]
    pub metadata: InnerSourceMetadata,
}

/// Composite output of the crawl
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Output {
    pub status: String,
    pub results: Vec<ScoredRepository>,
    pub metadata: CrawlStats,
    pub errors: Vec<String>,
}

/// Crawl metadata and statistics
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct CrawlStats {
    pub total_results: u32,
    pub processing_time_ms: u128,
    pub api_rate_limit_remaining: u32,
    pub partial_results: bool,
}
