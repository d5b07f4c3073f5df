use crate::models::framework::FrameworkTag;
use crate::models::repository::RepositoryRecord;
use crate::taxonomy::RuleTable;

pub struct FrameworkClassifier {
    rules: RuleTable,
}

impl FrameworkClassifier {
    pub fn new() -> Self {
        Self::with_rules(RuleTable::new())
    }

    pub fn with_rules(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Tags each record with at most one framework, in record order.
    pub fn classify(&self, records: &[RepositoryRecord]) -> Vec<FrameworkTag> {
        records
            .iter()
            .filter_map(|record| self.classify_one(record))
            .collect()
    }

    pub fn classify_one(&self, record: &RepositoryRecord) -> Option<FrameworkTag> {
        let name = record.name.to_lowercase();

        if let Some(rule) = self.rules.find_override(&name) {
            tracing::debug!(
                "{} pinned to {} by name override '{}'",
                record.name,
                rule.framework,
                rule.pattern
            );
            return Some(FrameworkTag {
                category: self.rules.category_of(&rule.language),
                language: rule.language.clone(),
                framework_name: rule.framework.clone(),
                repository: record.name.clone(),
            });
        }

        for language_rule in self.rules.languages() {
            if !record.has_language(&language_rule.language) {
                continue;
            }

            let hit = language_rule
                .frameworks
                .iter()
                .find(|f| f.keywords.iter().any(|k| name.contains(k.as_str())));

            if let Some(framework) = hit {
                return Some(FrameworkTag {
                    category: language_rule.category,
                    language: language_rule.language.clone(),
                    framework_name: framework.name.clone(),
                    repository: record.name.clone(),
                });
            }
        }

        None
    }
}

impl Default for FrameworkClassifier {
    fn default() -> Self {
        Self::new()
    }
}
