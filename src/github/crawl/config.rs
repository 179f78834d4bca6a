//! Configuration for crawl operations

use std::time::Duration;

use super::score::ScoreMode;

/// Configuration for crawl operations
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub max_results: usize,
    pub api_page_size: u8,
    pub api_timeout: Duration,
    pub concurrency_limit: usize,
    pub rate_limit_buffer: u32,
    pub score_mode: ScoreMode,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_results: 100,
            api_page_size: 100, // Maximum results per API page (GitHub API max)
            api_timeout: Duration::from_secs(10),
            concurrency_limit: 10,
            rate_limit_buffer: 5,
            score_mode: ScoreMode::default(),
        }
    }
}
