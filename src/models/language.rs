use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTotals {
    pub total_bytes: u64,
    pub total_lines_estimate: u64,
    pub repositories: Vec<String>,
}

pub type LanguageTally = BTreeMap<String, LanguageTotals>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLanguage {
    pub rank: u32,
    pub name: String,
    pub percentage: f64,
    pub bytes: u64,
    pub lines_estimate: u64,
    pub repositories: Vec<String>,
}

impl RankedLanguage {
    pub fn repository_count(&self) -> usize {
        self.repositories.len()
    }
}
