use std::time::Duration;

pub const API_BASE_URL: &str = "https://api.github.com";
pub const PER_PAGE: u32 = 100;
pub const MAX_RETRIES: u32 = 5;
pub const RATE_LIMIT_DELAY_SECS: u64 = 60;
pub const RETRY_DELAY_SECS: u64 = 10;
pub const DEFAULT_OUTPUT_FILE: &str = "stars.csv";

/// Knobs for the paginated stargazer fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    pub page_size: u32,
    /// Transport retries allowed over the whole run, not per page.
    pub max_retries: u32,
    pub rate_limit_delay: Duration,
    pub retry_delay: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            page_size: PER_PAGE,
            max_retries: MAX_RETRIES,
            rate_limit_delay: Duration::from_secs(RATE_LIMIT_DELAY_SECS),
            retry_delay: Duration::from_secs(RETRY_DELAY_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            user_agent: format!("star-history/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}
