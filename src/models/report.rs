use serde::{Deserialize, Serialize};

use super::framework::FrameworkTag;
use super::language::RankedLanguage;
use super::stats::UserStats;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Fallback { version: String },
}

impl DataSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataSource::Fallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub username: String,
    pub data_source: DataSource,
    pub languages: Vec<RankedLanguage>,
    pub frameworks: Vec<FrameworkTag>,
    pub stats: UserStats,
    pub excluded_languages: Vec<String>,
    pub excluded_repositories: Vec<String>,
}
