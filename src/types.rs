use serde::Deserialize;

// GitHub API response structures

/// `GET /repos/{owner}/{repo}`, only the field we need.
#[derive(Debug, Deserialize)]
pub struct GitHubRepo {
    pub stargazers_count: u64,
}

/// One entry of `GET /repos/{owner}/{repo}/stargazers` with the
/// `application/vnd.github.v3.star+json` media type.
#[derive(Debug, Deserialize)]
pub struct StargazerEntry {
    pub starred_at: String,
}
