use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum StarHistoryError {
    #[error("Invalid GitHub URL: {0}")]
    InvalidRepoUrl(String),

    #[error("GitHub API request failed with status code {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[source] BoxError),

    #[error("Failed to fetch stars after multiple retries: {source}")]
    RetriesExhausted {
        #[source]
        source: Box<StarHistoryError>,
    },

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid starred_at timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid CSV data: {0}")]
    InvalidCsv(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StarHistoryError {
    /// Network-level failures are the only ones the fetch loop retries.
    pub fn is_transport(&self) -> bool {
        matches!(self, StarHistoryError::Transport(_))
    }
}

impl From<reqwest::Error> for StarHistoryError {
    fn from(err: reqwest::Error) -> Self {
        StarHistoryError::Transport(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, StarHistoryError>;
