use clap::error::ErrorKind;
use clap::Parser;
use colored::*;
use star_history::chart::plot_stars;
use star_history::cli::Cli;
use star_history::csv_store::write_stars_csv;
use star_history::error::{Result, StarHistoryError};
use star_history::fetcher::StarFetcher;
use star_history::github::GitHubClient;
use star_history::repo_url::parse_github_url;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli).await {
        match e {
            StarHistoryError::InvalidRepoUrl(_) => eprintln!("{}", e.to_string().red()),
            _ => eprintln!("{} {}", "An error occurred:".red().bold(), e),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    println!("{}", "Parsing GitHub URL...".dimmed());
    let repo = parse_github_url(&cli.github_repository_url)?;
    println!(
        "Repository Owner: {}, Repository Name: {}",
        repo.owner.bold(),
        repo.repo.bold()
    );

    let client = GitHubClient::new(cli.github_token)?;
    let total_stars = client.get_repository_info(&repo).await?.stargazers_count;

    let fetcher = StarFetcher::new(client);
    let timeline = fetcher.fetch_stars(&repo, total_stars).await?;

    write_stars_csv(&cli.output, &timeline)?;
    println!(
        "{} {} stars saved to {}",
        "✅".green(),
        timeline.len(),
        cli.output.display()
    );

    if cli.no_chart {
        info!("Chart skipped");
    } else {
        plot_stars(&timeline)?;
    }

    Ok(())
}
