use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use langrank::config::DEFAULT_CONFIG_PATH;
use langrank::models::Report;
use langrank::render::group_thousands;
use langrank::{
    render_with_limit, AnalysisPipeline, Config, GitHubClient, GitHubContributionFeed,
    GitHubSource, PipelineConfig, ReportWriter,
};

#[derive(Parser, Debug)]
#[command(name = "langrank")]
#[command(version = "0.1.0")]
#[command(about = "Rank a GitHub user's languages and frameworks into JSON and Markdown reports")]
struct Args {
    /// GitHub username to analyze (defaults to GITHUB_USERNAME / GITHUB_REPOSITORY_OWNER)
    #[arg(short, long)]
    username: Option<String>,

    /// Exclusion config document
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Directory receiving language_ranking.json and language_ranking.md
    #[arg(short, long, default_value = ".")]
    output_dir: String,

    /// Skip the GitHub API and render the fallback snapshot
    #[arg(long)]
    offline: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("langrank=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = Config::from_env(&args.config)?;
    if let Some(username) = args.username.clone() {
        config.username = username;
    }

    let client = Arc::new(GitHubClient::new(
        config.github_token.as_deref(),
        Duration::from_secs(config.http_timeout_secs),
    )?);

    let pipeline = AnalysisPipeline::new(
        GitHubSource::new(client.clone(), config.exclusions.included_organizations.clone()),
        GitHubContributionFeed::new(client.clone()),
        PipelineConfig::from(&config),
    );

    tracing::info!("Starting language analysis for GitHub user: {}", config.username);
    let report = if args.offline {
        pipeline.fallback_report()
    } else {
        pipeline.run().await?
    };

    if let Some(remaining) = client.rate_limiter().remaining() {
        tracing::debug!("GitHub API budget left after run: {}", remaining);
    }

    let rendered = render_with_limit(&report, config.exclusions.top_languages)?;
    let writer = ReportWriter::new(&args.output_dir);
    writer.write(&rendered)?;

    print_summary(&report);

    Ok(())
}

fn print_summary(report: &Report) {
    let stats = &report.stats;

    println!("Analysis complete!");
    println!("\nTotal repositories analyzed: {}", stats.total_repos);
    println!("Owned repositories: {}", stats.owned_repos);
    println!("Contributed repositories: {}", stats.contributed_repos);

    if !report.excluded_repositories.is_empty() {
        println!(
            "Excluded repositories: {}",
            report.excluded_repositories.join(", ")
        );
    }

    println!("\nTop 5 languages:");
    for language in report.languages.iter().take(5) {
        println!(
            "{}. {}: {:.1}% ({} bytes, {} repos)",
            language.rank,
            language.name,
            language.percentage,
            group_thousands(language.bytes),
            language.repository_count()
        );
    }
}
