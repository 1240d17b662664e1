use crate::config::FetchPolicy;
use crate::error::{Result, StarHistoryError};
use crate::github::{PageResponse, StargazerApi};
use crate::models::{PageCursor, StarEvent, StarTimeline};
use crate::repo_url::RepoId;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Walks the stargazer listing page by page and collects every starred
/// timestamp in arrival order.
pub struct StarFetcher<A> {
    api: A,
    policy: FetchPolicy,
}

impl<A: StargazerApi> StarFetcher<A> {
    pub fn new(api: A) -> Self {
        Self::with_policy(api, FetchPolicy::default())
    }

    pub fn with_policy(api: A, policy: FetchPolicy) -> Self {
        Self { api, policy }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetches `ceil(total_stars / page_size)` pages.
    ///
    /// A 403 sleeps for the rate-limit delay and repeats the page without
    /// touching the retry budget. Transport failures repeat the page after the
    /// retry delay until the run-wide budget is spent. Any other failure, and
    /// any malformed entry, ends the run. An empty page ends it early without
    /// error.
    pub async fn fetch_stars(&self, repo: &RepoId, total_stars: u64) -> Result<StarTimeline> {
        info!("Fetching stars for repository: {}", repo.full_name());

        let mut timeline = StarTimeline::new();
        let mut cursor = PageCursor::new(
            total_stars,
            self.policy.page_size,
            self.policy.max_retries,
        );

        info!(
            "Total stars: {}. Fetching {} pages...",
            total_stars, cursor.total_pages
        );

        while cursor.has_next() {
            info!("Fetching page {} of {}...", cursor.page, cursor.total_pages);

            match self
                .api
                .fetch_stargazers_page(repo, cursor.page, self.policy.page_size)
                .await
            {
                Ok(PageResponse::RateLimited) => {
                    warn!(
                        page = cursor.page,
                        "Rate limit exceeded. Retrying in {} seconds...",
                        self.policy.rate_limit_delay.as_secs()
                    );
                    sleep(self.policy.rate_limit_delay).await;
                }
                Ok(PageResponse::Entries(entries)) => {
                    if entries.is_empty() {
                        debug!(page = cursor.page, "Empty page, stopping early");
                        break;
                    }

                    for entry in &entries {
                        timeline.push(StarEvent::parse(&entry.starred_at)?);
                    }
                    cursor.advance();
                }
                Err(e) if e.is_transport() => {
                    if !cursor.take_retry() {
                        return Err(StarHistoryError::RetriesExhausted {
                            source: Box::new(e),
                        });
                    }
                    warn!(
                        page = cursor.page,
                        "{}. Retrying... ({} retries left)",
                        e,
                        cursor.retries_left
                    );
                    sleep(self.policy.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }

        info!("Total stars fetched: {}", timeline.len());
        Ok(timeline)
    }
}
