use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::github::GitHubClient;
use crate::models::{merge_feeds, ContributionCounts, Repository, RepositoryRecord};
use crate::source::{ContributionFeed, RepositorySource};

pub struct GitHubSource {
    client: Arc<GitHubClient>,
    organizations: Vec<String>,
}

impl GitHubSource {
    pub fn new(client: Arc<GitHubClient>, organizations: Vec<String>) -> Self {
        Self {
            client,
            organizations,
        }
    }

    async fn contributed_repos(&self, identity: &str) -> Result<Vec<Repository>> {
        let mut contributed = Vec::new();

        for org in &self.organizations {
            let repos = self.client.get_org_repos(org).await?;

            for repo in repos.into_iter().filter(|r| !r.fork) {
                let contributors = self
                    .client
                    .get_repo_contributors(&repo.owner.login, &repo.name)
                    .await?;

                let is_contributor = contributors.iter().any(|c| {
                    c.login
                        .as_deref()
                        .map(|login| login.eq_ignore_ascii_case(identity))
                        .unwrap_or(false)
                });

                if is_contributor {
                    tracing::debug!("{} contributed to {}", identity, repo.full_name);
                    contributed.push(repo);
                }
            }
        }

        Ok(contributed)
    }

    async fn to_records(
        &self,
        repos: &[Repository],
        owned: bool,
        pb: &ProgressBar,
    ) -> Result<Vec<RepositoryRecord>> {
        let mut records = Vec::with_capacity(repos.len());

        for repo in repos {
            let languages = self
                .client
                .get_repo_languages(&repo.owner.login, &repo.name)
                .await?;

            let mut record = if owned {
                RepositoryRecord::owned(repo.name.clone())
            } else {
                RepositoryRecord::contributed(repo.name.clone())
            };
            record.language_bytes = languages;
            record.stars = repo.stargazers_count as u64;

            records.push(record);
            pb.inc(1);
        }

        Ok(records)
    }

    async fn fetch_live(&self, identity: &str) -> Result<Vec<RepositoryRecord>> {
        let user = self.client.get_user(identity).await?;
        tracing::info!("{} has {} public repositories", user.login, user.public_repos);

        let owned: Vec<Repository> = self
            .client
            .get_user_repos(identity)
            .await?
            .into_iter()
            .filter(|r| !r.fork)
            .collect();
        let contributed = self.contributed_repos(identity).await?;

        tracing::info!(
            "Found {} owned and {} contributed repositories",
            owned.len(),
            contributed.len()
        );

        let pb = ProgressBar::new((owned.len() + contributed.len()) as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos")
        {
            pb.set_style(style.progress_chars("#>-"));
        }

        let result = async {
            let owned_records = self.to_records(&owned, true, &pb).await?;
            let contributed_records = self.to_records(&contributed, false, &pb).await?;
            Ok::<_, Error>(merge_feeds(owned_records, contributed_records))
        }
        .await;

        match &result {
            Ok(_) => pb.finish_with_message("Fetched language statistics"),
            Err(_) => pb.abandon(),
        }

        result
    }
}

#[async_trait]
impl RepositorySource for GitHubSource {
    async fn fetch(&self, identity: &str) -> Result<Vec<RepositoryRecord>> {
        // Unknown users are reported, never replaced by the snapshot.
        self.fetch_live(identity).await.map_err(|e| match e {
            Error::UserNotFound(_) => e,
            e if e.is_transient() => e,
            e => Error::Unavailable(e.to_string()),
        })
    }

    fn name(&self) -> &str {
        "github"
    }
}

pub struct GitHubContributionFeed {
    client: Arc<GitHubClient>,
}

impl GitHubContributionFeed {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }

    async fn count(&self, kind: &str, query: String) -> Option<u64> {
        match self.client.search_total(kind, &query).await {
            Ok(total) => Some(total),
            Err(e) => {
                tracing::warn!("Search '{}' failed: {}", query, e);
                None
            }
        }
    }
}

#[async_trait]
impl ContributionFeed for GitHubContributionFeed {
    async fn fetch_counts(&self, identity: &str) -> ContributionCounts {
        tracing::info!("Fetching contribution counts for: {}", identity);

        ContributionCounts {
            commits: self.count("commits", format!("author:{}", identity)).await,
            pull_requests: self
                .count("issues", format!("type:pr author:{}", identity))
                .await,
            issues: self
                .count("issues", format!("type:issue author:{}", identity))
                .await,
        }
    }
}
