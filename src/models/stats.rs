use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Commits,
    PullRequests,
    Issues,
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Commits => write!(f, "commits"),
            Metric::PullRequests => write!(f, "pull requests"),
            Metric::Issues => write!(f, "issues"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionCounts {
    pub commits: Option<u64>,
    pub pull_requests: Option<u64>,
    pub issues: Option<u64>,
}

impl ContributionCounts {
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn get(&self, metric: Metric) -> Option<u64> {
        match metric {
            Metric::Commits => self.commits,
            Metric::PullRequests => self.pull_requests,
            Metric::Issues => self.issues,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_commits: u64,
    pub total_contributions: u64,
    pub pull_requests: u64,
    pub issues: u64,
    pub stars_gained: u64,
    pub total_repos: u64,
    pub owned_repos: u64,
    pub contributed_repos: u64,
    /// Metrics reported as 0 because the feed could not supply them.
    #[serde(default)]
    pub unavailable_metrics: Vec<Metric>,
}

impl UserStats {
    pub fn is_unavailable(&self, metric: Metric) -> bool {
        self.unavailable_metrics.contains(&metric)
    }
}
