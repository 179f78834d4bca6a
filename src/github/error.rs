//! GitHub API error types

use thiserror::Error;

/// Error types for GitHub API operations
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Octocrab library error
    #[error("Octocrab error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// Client setup/configuration error
    #[error("Client setup failed: {0}")]
    ClientSetup(String),
}

/// Convenience result alias for GitHub operations
pub type GitHubResult<T> = Result<T, GitHubError>;
