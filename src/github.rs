use crate::config::ClientConfig;
use crate::error::{Result, StarHistoryError};
use crate::repo_url::RepoId;
use crate::types::{GitHubRepo, StargazerEntry};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

const REPO_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
const STAR_MEDIA_TYPE: &str = "application/vnd.github.v3.star+json";

/// Outcome of a single stargazer page request that is not a hard failure.
#[derive(Debug)]
pub enum PageResponse {
    /// HTTP 403. The caller decides how long to back off.
    RateLimited,
    /// HTTP 200. An empty vector means the listing is exhausted.
    Entries(Vec<StargazerEntry>),
}

/// The one endpoint the paginated fetch depends on.
#[allow(async_fn_in_trait)]
pub trait StargazerApi {
    async fn fetch_stargazers_page(
        &self,
        repo: &RepoId,
        page: u64,
        per_page: u32,
    ) -> Result<PageResponse>;
}

pub struct GitHubClient {
    client: Client,
    token: String,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: String) -> Result<Self> {
        Self::with_config(token, ClientConfig::default())
    }

    pub fn with_config(token: String, config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(GitHubClient {
            client,
            token,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, url: &str, accept: &str, query: &[(&str, String)]) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header(ACCEPT, accept)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .send()
            .await?;

        if let Some(remaining) = rate_limit_remaining(&response) {
            debug!(url, status = %response.status(), remaining, "GitHub response");
        }

        Ok(response)
    }

    /// Reads the repository resource for its total star count. Any status
    /// other than 200 is fatal.
    pub async fn get_repository_info(&self, repo: &RepoId) -> Result<GitHubRepo> {
        let url = format!("{}/repos/{}/{}", self.base_url, repo.owner, repo.repo);
        let response = self.get(&url, REPO_MEDIA_TYPE, &[]).await?;

        if response.status() != StatusCode::OK {
            return Err(api_error(response).await);
        }

        let body = response.text().await?;
        let repo_data: GitHubRepo = serde_json::from_str(&body)?;
        Ok(repo_data)
    }
}

impl StargazerApi for GitHubClient {
    async fn fetch_stargazers_page(
        &self,
        repo: &RepoId,
        page: u64,
        per_page: u32,
    ) -> Result<PageResponse> {
        let url = format!("{}/repos/{}/{}/stargazers", self.base_url, repo.owner, repo.repo);
        let query = [("page", page.to_string()), ("per_page", per_page.to_string())];
        let response = self.get(&url, STAR_MEDIA_TYPE, &query).await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                let entries: Vec<StargazerEntry> = serde_json::from_str(&body)?;
                Ok(PageResponse::Entries(entries))
            }
            StatusCode::FORBIDDEN => Ok(PageResponse::RateLimited),
            _ => Err(api_error(response).await),
        }
    }
}

async fn api_error(response: Response) -> StarHistoryError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    StarHistoryError::ApiError { status, message }
}

fn rate_limit_remaining(response: &Response) -> Option<u32> {
    response
        .headers()
        .get("X-RateLimit-Remaining")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u32>().ok())
}
