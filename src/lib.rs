pub mod chart;
pub mod cli;
pub mod config;
pub mod csv_store;
pub mod error;
pub mod fetcher;
pub mod github;
pub mod models;
pub mod repo_url;
pub mod types;
