#![allow(dead_code)]

use star_history::error::{Result, StarHistoryError};
use star_history::github::{PageResponse, StargazerApi};
use star_history::repo_url::RepoId;
use star_history::types::StargazerEntry;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub fn repo_id(owner: &str, repo: &str) -> RepoId {
    RepoId {
        owner: owner.to_string(),
        repo: repo.to_string(),
    }
}

pub fn entries(timestamps: &[&str]) -> PageResponse {
    PageResponse::Entries(
        timestamps
            .iter()
            .map(|t| StargazerEntry {
                starred_at: t.to_string(),
            })
            .collect(),
    )
}

pub fn transport_error() -> StarHistoryError {
    StarHistoryError::Transport("connection reset by peer".into())
}

/// Plays back a fixed list of page results and records which pages were
/// requested.
pub struct ScriptedApi {
    script: Mutex<VecDeque<Result<PageResponse>>>,
    requested: Mutex<Vec<u64>>,
}

impl ScriptedApi {
    pub fn new(script: Vec<Result<PageResponse>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_pages(&self) -> Vec<u64> {
        self.requested.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

impl StargazerApi for ScriptedApi {
    async fn fetch_stargazers_page(
        &self,
        _repo: &RepoId,
        page: u64,
        per_page: u32,
    ) -> Result<PageResponse> {
        assert_eq!(per_page, 100);
        self.requested.lock().unwrap().push(page);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left for page {}", page))
    }
}

#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Minimal HTTP/1.1 server answering one connection per canned response.
pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(responses: Vec<CannedResponse>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();

        let handle = tokio::spawn(async move {
            for response in responses {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };

                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                recorded
                    .lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&head).to_string());

                let reply = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nX-RateLimit-Remaining: 4999\r\nConnection: close\r\n\r\n{}",
                    response.status,
                    response.body.len(),
                    response.body
                );
                let _ = stream.write_all(reply.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Ok(Self {
            base_url,
            requests,
            handle,
        })
    }

    /// Raw request heads received so far, lowercased for header matching.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.to_lowercase())
            .collect()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Address with nothing listening on it.
pub async fn closed_port_url() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}
