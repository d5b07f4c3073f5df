//! Curated snapshot used whenever the live source cannot be reached.

use crate::models::repository::{merge_feeds, RepositoryRecord};
use crate::taxonomy::typical_project_bytes;

pub const FALLBACK_DATA_VERSION: &str = "2025.1";

const OWNED: &[(&str, &[&str])] = &[
    ("DioxusTest", &["Rust"]),
    ("KetchApp-Kafka", &["Java"]),
    ("Progetto-Fondamenti-Web", &["CSS"]),
    ("KetchApp-Auth-Api", &["Rust"]),
    ("leptos_styles", &["Makefile"]),
    ("ReactTest", &["TypeScript"]),
    ("Tokio-TCP-Chat-Test", &["Rust"]),
    ("Progetto-Machine-Learning", &["Jupyter Notebook"]),
    ("Progetto-Ingegneria-Web", &["Vue"]),
    ("LeptosTest", &["Rust"]),
    ("SycamoreTest", &["Rust"]),
    ("Progetto-Big-Data", &["Jupyter Notebook"]),
    ("gpuiTest", &["Rust"]),
    ("AlbionManagerDiscord", &["Rust"]),
    ("RustProject", &["Rust"]),
    ("Card-Game-Builder", &[]),
    ("My-Zed-IDE-Snippets", &[]),
    ("alessandrobrunoh", &[]),
    ("alessandrobrunoh.github.io", &["SCSS"]),
];

// (repository, organization, languages)
const CONTRIBUTED: &[(&str, &str, &[&str])] = &[
    ("KetchApp-Flutter", "Dibbiii", &["Dart", "C++"]),
    ("KetchApp-API", "Dibbiii", &["Java"]),
    ("KetchApp-BFF", "Dibbiii", &["Java"]),
    ("releases", "ketchapp-for-study", &[]),
];

fn with_estimates(mut record: RepositoryRecord, languages: &[&str]) -> RepositoryRecord {
    for language in languages {
        record = record.with_language(*language, typical_project_bytes(language));
    }
    record
}

pub fn fallback_records() -> Vec<RepositoryRecord> {
    let owned = OWNED
        .iter()
        .map(|(name, languages)| with_estimates(RepositoryRecord::owned(*name), languages))
        .collect();

    let contributed = CONTRIBUTED
        .iter()
        .map(|(name, _org, languages)| {
            with_estimates(RepositoryRecord::contributed(*name), languages)
        })
        .collect();

    merge_feeds(owned, contributed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_snapshot_shape() {
        let records = fallback_records();
        assert_eq!(records.len(), 23);
        assert_eq!(records.iter().filter(|r| r.owner_is_user).count(), 19);
        assert_eq!(records.iter().filter(|r| r.is_contributed).count(), 4);

        let names: HashSet<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), records.len());
    }

    #[test]
    fn test_snapshot_uses_language_estimates() {
        let records = fallback_records();
        let flutter = records.iter().find(|r| r.name == "KetchApp-Flutter").unwrap();
        assert_eq!(flutter.language_bytes["Dart"], 12_000);
        assert_eq!(flutter.language_bytes["C++"], 10_000);

        let snippets = records.iter().find(|r| r.name == "My-Zed-IDE-Snippets").unwrap();
        assert!(snippets.language_bytes.is_empty());
    }
}
