use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_OUTPUT_FILE;

#[derive(Parser, Debug)]
#[command(name = "star-history")]
#[command(about = "Fetches the star history of a GitHub repository and charts it over time")]
#[command(version)]
pub struct Cli {
    /// Repository URL, e.g. https://github.com/owner/repo
    pub github_repository_url: String,

    /// GitHub access token
    pub github_token: String,

    /// Where to write the starred_at timestamps
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Skip the interactive chart
    #[arg(long)]
    pub no_chart: bool,
}
