//! GitHub API client wrapper
//!
//! Provides a thin Octocrab wrapper so the rest of the crate never builds
//! its own API client.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ghcrawl::GitHubClient;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let gh = GitHubClient::with_token("ghp_...")?;
//!
//! let repo = gh.get_repository("rust-lang", "rust").await?;
//! println!("{}", repo.name);
//! # Ok(())
//! # }
//! ```

use std::env;
use std::sync::Arc;

use octocrab::Octocrab;
use octocrab::models::Repository;

use crate::github::error::{GitHubError, GitHubResult};

/// Default GitHub token environment variable key
pub const TOKEN_ENV_KEY: &str = "GITHUB_TOKEN";

/// GitHub API client wrapper that encapsulates Octocrab.
///
/// Cloning is cheap (Arc clone).
#[derive(Clone, Debug)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
}

impl GitHubClient {
    /// Create a new client builder
    #[must_use]
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Convenience: create client with personal access token.
    ///
    /// An empty token results in an unauthenticated client, which makes
    /// unauthenticated requests.
    pub fn with_token(token: impl Into<String>) -> GitHubResult<Self> {
        Self::builder().personal_token(token).build()
    }

    /// Convenience: create a client from the `$GITHUB_TOKEN` environment
    /// variable, falling back to an unauthenticated client when unset.
    pub fn from_env() -> GitHubResult<Self> {
        Self::with_token(env::var(TOKEN_ENV_KEY).unwrap_or_default())
    }

    /// Get inner Octocrab client
    #[must_use]
    pub fn inner(&self) -> &Arc<Octocrab> {
        &self.inner
    }

    /// Get the full record of a single repository
    pub async fn get_repository(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> GitHubResult<Repository> {
        Ok(self.inner.repos(owner.into(), repo.into()).get().await?)
    }

    /// Get the current API rate limit status
    pub async fn rate_limit(&self) -> GitHubResult<octocrab::models::RateLimit> {
        Ok(self.inner.ratelimit().get().await?)
    }
}

/// Builder for [`GitHubClient`]
#[derive(Debug, Default)]
pub struct GitHubClientBuilder {
    token: Option<String>,
    base_uri: Option<String>,
}

impl GitHubClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticate with a personal access token; empty tokens are ignored
    #[must_use]
    pub fn personal_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        if !token.is_empty() {
            self.token = Some(token);
        }
        self
    }

    /// Point the client at a GitHub Enterprise instance
    #[must_use]
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    pub fn build(self) -> GitHubResult<GitHubClient> {
        let mut builder = Octocrab::builder();

        if let Some(token) = self.token {
            builder = builder.personal_token(token);
        }

        if let Some(uri) = self.base_uri {
            builder = builder
                .base_uri(uri)
                .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;
        }

        let inner = builder
            .build()
            .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;

        Ok(GitHubClient {
            inner: Arc::new(inner),
        })
    }
}
