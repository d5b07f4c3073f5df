use std::collections::BTreeSet;

use crate::models::language::{LanguageTally, RankedLanguage};
use crate::models::repository::RepositoryRecord;

pub struct LanguageAggregator {
    bytes_per_line: u64,
}

impl LanguageAggregator {
    pub fn new(bytes_per_line: u64) -> Self {
        Self {
            bytes_per_line: bytes_per_line.max(1),
        }
    }

    pub fn tally(
        &self,
        records: &[RepositoryRecord],
        excluded_languages: &BTreeSet<String>,
    ) -> LanguageTally {
        let mut tally = LanguageTally::new();

        for record in records {
            for (language, &bytes) in &record.language_bytes {
                if bytes == 0 || excluded_languages.contains(language) {
                    continue;
                }

                let entry = tally.entry(language.clone()).or_default();
                entry.total_bytes += bytes;
                entry.repositories.push(record.name.clone());
            }
        }

        for totals in tally.values_mut() {
            totals.total_lines_estimate = totals.total_bytes / self.bytes_per_line;
        }

        tally
    }

    pub fn aggregate(
        &self,
        records: &[RepositoryRecord],
        excluded_languages: &BTreeSet<String>,
    ) -> Vec<RankedLanguage> {
        self.rank(self.tally(records, excluded_languages))
    }

    pub fn rank(&self, tally: LanguageTally) -> Vec<RankedLanguage> {
        let total_bytes: u64 = tally.values().map(|t| t.total_bytes).sum();

        let mut ranked: Vec<RankedLanguage> = tally
            .into_iter()
            .map(|(name, totals)| {
                let percentage = if total_bytes == 0 {
                    0.0
                } else {
                    totals.total_bytes as f64 * 100.0 / total_bytes as f64
                };

                RankedLanguage {
                    rank: 0,
                    name,
                    percentage,
                    bytes: totals.total_bytes,
                    lines_estimate: totals.total_lines_estimate,
                    repositories: totals.repositories,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.name.cmp(&b.name)));

        for (i, language) in ranked.iter_mut().enumerate() {
            language.rank = i as u32 + 1;
        }

        ranked
    }
}
