use crate::models::repository::RepositoryRecord;
use crate::models::stats::{ContributionCounts, Metric, UserStats};

const METRICS: [Metric; 3] = [Metric::Commits, Metric::PullRequests, Metric::Issues];

pub struct StatisticsSummarizer;

impl StatisticsSummarizer {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, records: &[RepositoryRecord], counts: &ContributionCounts) -> UserStats {
        let mut stats = UserStats::default();

        for record in records {
            if record.owner_is_user {
                stats.owned_repos += 1;
            } else if record.is_contributed {
                stats.contributed_repos += 1;
            } else {
                tracing::debug!("{} is neither owned nor contributed, not counted", record.name);
                continue;
            }
            stats.stars_gained += record.stars;
        }
        stats.total_repos = stats.owned_repos + stats.contributed_repos;

        for metric in METRICS {
            let value = match counts.get(metric) {
                Some(value) => value,
                None => {
                    tracing::warn!("Metric unavailable, reporting {} as 0", metric);
                    stats.unavailable_metrics.push(metric);
                    0
                }
            };

            match metric {
                Metric::Commits => stats.total_commits = value,
                Metric::PullRequests => stats.pull_requests = value,
                Metric::Issues => stats.issues = value,
            }
        }

        stats.total_contributions = stats.total_commits + stats.pull_requests + stats.issues;

        stats
    }
}

impl Default for StatisticsSummarizer {
    fn default() -> Self {
        Self::new()
    }
}
