use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub owner_is_user: bool,
    pub language_bytes: BTreeMap<String, u64>,
    pub stars: u64,
    pub is_contributed: bool,
}

impl RepositoryRecord {
    pub fn owned(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_is_user: true,
            language_bytes: BTreeMap::new(),
            stars: 0,
            is_contributed: false,
        }
    }

    pub fn contributed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_is_user: false,
            language_bytes: BTreeMap::new(),
            stars: 0,
            is_contributed: true,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>, bytes: u64) -> Self {
        *self.language_bytes.entry(language.into()).or_insert(0) += bytes;
        self
    }

    pub fn with_stars(mut self, stars: u64) -> Self {
        self.stars = stars;
        self
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.language_bytes.contains_key(language)
    }
}

/// Owned records win on duplicate names; each feed keeps its input order.
pub fn merge_feeds(
    owned: Vec<RepositoryRecord>,
    contributed: Vec<RepositoryRecord>,
) -> Vec<RepositoryRecord> {
    let mut seen = std::collections::HashSet::new();
    let mut merged = Vec::with_capacity(owned.len() + contributed.len());

    for record in owned.into_iter().chain(contributed) {
        if seen.insert(record.name.clone()) {
            merged.push(record);
        } else {
            tracing::debug!("Dropping duplicate repository record: {}", record.name);
        }
    }

    merged
}
