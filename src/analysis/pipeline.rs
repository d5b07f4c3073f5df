use std::sync::Arc;

use crate::analysis::aggregator::LanguageAggregator;
use crate::analysis::classifier::FrameworkClassifier;
use crate::analysis::summarizer::StatisticsSummarizer;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{merge_feeds, ContributionCounts, DataSource, RepositoryRecord, Report};
use crate::source::{fallback_records, ContributionFeed, RepositorySource, FALLBACK_DATA_VERSION};

pub struct AnalysisPipeline {
    source: Arc<dyn RepositorySource>,
    feed: Arc<dyn ContributionFeed>,
    aggregator: LanguageAggregator,
    classifier: FrameworkClassifier,
    summarizer: StatisticsSummarizer,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(
        source: impl RepositorySource + 'static,
        feed: impl ContributionFeed + 'static,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source: Arc::new(source),
            feed: Arc::new(feed),
            aggregator: LanguageAggregator::new(config.bytes_per_line),
            classifier: FrameworkClassifier::new(),
            summarizer: StatisticsSummarizer::new(),
            config,
        }
    }

    /// One attempt against the live source, else the fallback snapshot.
    pub async fn run(&self) -> Result<Report> {
        let username = &self.config.username;
        tracing::info!("Fetching repositories from {} for: {}", self.source.name(), username);

        match self.source.fetch(username).await {
            Ok(records) => {
                tracing::info!("Live source returned {} repositories", records.len());
                let counts = self.feed.fetch_counts(username).await;
                Ok(self.build_report(records, counts, DataSource::Live))
            }
            Err(e) if e.is_transient() => {
                tracing::warn!("Live data unavailable ({}), using fallback snapshot", e);
                Ok(self.fallback_report())
            }
            Err(e) => Err(e),
        }
    }

    pub fn fallback_report(&self) -> Report {
        tracing::info!("Building report from fallback snapshot {}", FALLBACK_DATA_VERSION);
        self.build_report(
            fallback_records(),
            ContributionCounts::unavailable(),
            DataSource::Fallback {
                version: FALLBACK_DATA_VERSION.to_string(),
            },
        )
    }

    pub fn build_report(
        &self,
        records: Vec<RepositoryRecord>,
        counts: ContributionCounts,
        data_source: DataSource,
    ) -> Report {
        let records = self.apply_exclusions(records);
        tracing::info!("Analyzing {} repositories", records.len());

        let languages = self
            .aggregator
            .aggregate(&records, &self.config.excluded_languages);
        tracing::info!("Ranked {} languages", languages.len());

        let frameworks = self.classifier.classify(&records);
        tracing::info!("Detected {} framework tags", frameworks.len());

        let stats = self.summarizer.summarize(&records, &counts);

        Report {
            username: self.config.username.clone(),
            data_source,
            languages,
            frameworks,
            stats,
            excluded_languages: self.config.excluded_languages.iter().cloned().collect(),
            excluded_repositories: self.config.excluded_repositories.iter().cloned().collect(),
        }
    }

    fn apply_exclusions(&self, records: Vec<RepositoryRecord>) -> Vec<RepositoryRecord> {
        let (owned, contributed): (Vec<_>, Vec<_>) = records
            .into_iter()
            .filter(|r| {
                let excluded = self.config.excluded_repositories.contains(&r.name);
                if excluded {
                    tracing::debug!("Skipping excluded repository: {}", r.name);
                }
                !excluded
            })
            .partition(|r| r.owner_is_user);

        merge_feeds(owned, contributed)
    }
}
