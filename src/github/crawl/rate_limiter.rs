//! Rate limiting support

use chrono::{DateTime, Utc};
use log::info;
use std::time::Duration;
use tokio::time::sleep;

use super::types::{CrawlError, CrawlResult};

// The search API allows 30 requests per minute for authenticated clients.
pub(crate) const SEARCH_QUOTA: u32 = 30;

/// Rate limiting support for the search API
pub(crate) struct RateLimiter {
    pub(crate) remaining: u32,
    pub(crate) reset_time: DateTime<Utc>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            remaining: SEARCH_QUOTA,
            reset_time: Utc::now() + chrono::Duration::minutes(1),
        }
    }

    pub fn update(&mut self, remaining: u32, reset_time: DateTime<Utc>) {
        self.remaining = remaining;
        self.reset_time = reset_time;
    }

    pub fn can_make_request(&self) -> bool {
        self.remaining > 0 || Utc::now() > self.reset_time
    }

    pub fn check_and_reset_if_expired(&mut self) {
        // Past the reset time, the quota refreshes to its default
        if Utc::now() > self.reset_time {
            self.remaining = SEARCH_QUOTA;
            self.reset_time = Utc::now() + chrono::Duration::minutes(1);
        }
    }

    pub async fn wait_if_needed(&self, buffer: u32) -> CrawlResult<()> {
        if self.remaining <= buffer && Utc::now() < self.reset_time {
            let wait_time = (self.reset_time - Utc::now())
                .to_std()
                .unwrap_or(Duration::from_secs(60));

            if wait_time > Duration::from_secs(300) {
                return Err(CrawlError::RateLimitExceeded {
                    remaining: self.remaining,
                    reset_time: self.reset_time,
                });
            }

            info!("Rate limit approaching, waiting {wait_time:?}");
            sleep(wait_time).await;
        }
        Ok(())
    }
}
