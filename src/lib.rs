pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod source;
pub mod taxonomy;
pub mod analysis;
pub mod render;
pub mod output;

pub use config::{Config, ExclusionConfig, PipelineConfig};
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use source::{ContributionFeed, GitHubContributionFeed, GitHubSource, RepositorySource};
pub use analysis::AnalysisPipeline;
pub use render::{render_with_limit, RenderedReport};
pub use output::ReportWriter;
