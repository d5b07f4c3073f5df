pub mod fallback;
pub mod github;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ContributionCounts, RepositoryRecord};

pub use fallback::{fallback_records, FALLBACK_DATA_VERSION};
pub use github::{GitHubContributionFeed, GitHubSource};

#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn fetch(&self, identity: &str) -> Result<Vec<RepositoryRecord>>;
    fn name(&self) -> &str;
}

/// Supplies activity counts. Metrics it cannot obtain are left as `None`.
#[async_trait]
pub trait ContributionFeed: Send + Sync {
    async fn fetch_counts(&self, identity: &str) -> ContributionCounts;
}
