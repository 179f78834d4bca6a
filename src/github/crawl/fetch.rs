//! Repository fetching logic

use chrono::{DateTime, Utc};
use log::warn;
use octocrab::models::Repository;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::github::client::GitHubClient;
use crate::github::crawl::config::CrawlConfig;
use crate::github::crawl::rate_limiter::{RateLimiter, SEARCH_QUOTA};
use crate::github::crawl::types::{CrawlError, CrawlResult};

/// Fetches repositories matching the rendered search qualifiers
pub(crate) async fn fetch_repos(
    client: &GitHubClient,
    search_terms: &str,
    config: &CrawlConfig,
    rate_limiter: &Arc<RwLock<RateLimiter>>,
) -> CrawlResult<(Vec<Repository>, u32, u32)> {
    // Check rate limit before making request
    {
        // First, check if rate limit needs reset (requires write lock)
        let mut limiter = rate_limiter.write().await;
        limiter.check_and_reset_if_expired();

        if !limiter.can_make_request() {
            return Err(CrawlError::RateLimitExceeded {
                remaining: limiter.remaining,
                reset_time: limiter.reset_time,
            });
        }

        // Wait if we're approaching the limit (downgrade to read lock for waiting)
        drop(limiter);
        let limiter = rate_limiter.read().await;
        limiter.wait_if_needed(config.rate_limit_buffer).await?;
    }

    let search_future = client
        .inner()
        .search()
        .repositories(search_terms)
        .sort("stars")
        .order("desc")
        .per_page(config.api_page_size)
        .send();

    let search_resp = tokio::time::timeout(config.api_timeout, search_future)
        .await
        .map_err(|_| CrawlError::Timeout {
            operation: "repository_search".to_string(),
            duration: config.api_timeout,
        })?
        .map_err(|e| CrawlError::Api(e.to_string()))?;

    // Refresh the limiter from the rate limit API
    let rate_limit_remaining = match client.rate_limit().await {
        Ok(rate_limit) => {
            let remaining = rate_limit.resources.search.remaining as u32;
            let reset_timestamp = rate_limit.resources.search.reset;
            let reset_time = DateTime::from_timestamp(reset_timestamp as i64, 0)
                .unwrap_or_else(|| Utc::now() + chrono::Duration::minutes(1));

            {
                let mut limiter = rate_limiter.write().await;
                limiter.update(remaining, reset_time);
            }

            remaining
        }
        Err(e) => {
            // Default fallback if the rate limit check fails
            warn!("Failed to refresh the search rate limit: {e}");
            SEARCH_QUOTA
        }
    };

    let repos = search_resp.items;
    let total = search_resp.total_count.unwrap_or(0) as u32;

    Ok((repos, total, rate_limit_remaining))
}
