pub mod aggregator;
pub mod classifier;
pub mod summarizer;
pub mod pipeline;

pub use aggregator::LanguageAggregator;
pub use classifier::FrameworkClassifier;
pub use summarizer::StatisticsSummarizer;
pub use pipeline::AnalysisPipeline;
