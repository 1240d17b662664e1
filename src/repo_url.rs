use crate::error::{Result, StarHistoryError};

const GITHUB_PREFIX: &str = "https://github.com/";

/// Owner and name of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Extracts owner and repo from `https://github.com/<owner>/<repo>[/...]`.
/// Anything after the repo segment is ignored.
pub fn parse_github_url(url: &str) -> Result<RepoId> {
    let invalid = || StarHistoryError::InvalidRepoUrl(url.to_string());

    let path = url.strip_prefix(GITHUB_PREFIX).ok_or_else(invalid)?;
    let mut segments = path.split('/');

    let owner = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    let repo = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;

    Ok(RepoId {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}
