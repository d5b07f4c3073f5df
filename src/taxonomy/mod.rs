pub mod languages;

use crate::models::framework::FrameworkCategory;

pub use languages::{typical_project_bytes, DEFAULT_PROJECT_BYTES};

#[derive(Debug, Clone)]
pub struct FrameworkRule {
    pub name: String,
    /// Lowercase substrings looked up in the lowercased repository name.
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LanguageRule {
    pub language: String,
    pub category: FrameworkCategory,
    pub frameworks: Vec<FrameworkRule>,
}

#[derive(Debug, Clone)]
pub struct NameOverride {
    pub pattern: String,
    pub language: String,
    pub framework: String,
}

// Overrides first, then languages, frameworks and keywords in table order.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    languages: Vec<LanguageRule>,
    overrides: Vec<NameOverride>,
}

impl RuleTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new() -> Self {
        let mut table = Self::empty();

        table.init_primary();
        table.init_additional();
        table.init_data_analytics();
        table.init_overrides();

        table
    }

    fn init_primary(&mut self) {
        use FrameworkCategory::Primary;

        self.add_language(
            "Rust",
            Primary,
            &[
                ("Leptos", &["leptos"]),
                ("Dioxus", &["dioxus"]),
                ("Sycamore", &["sycamore"]),
                ("Actix", &["actix"]),
                ("Tokio", &["tokio"]),
                ("Axum", &["axum"]),
                ("GPUI", &["gpui"]),
            ],
        );
        self.add_language(
            "Java",
            Primary,
            &[
                ("Spring Boot", &["spring"]),
                ("Apache Kafka", &["kafka"]),
                ("Quarkus", &["quarkus"]),
            ],
        );
        self.add_language(
            "TypeScript",
            Primary,
            &[
                ("React", &["react"]),
                ("Next.js", &["nextjs", "next-"]),
                ("Angular", &["angular"]),
            ],
        );
        self.add_language("Vue", Primary, &[("Nuxt", &["nuxt"]), ("Vue.js", &["vue", "web"])]);
    }

    fn init_additional(&mut self) {
        use FrameworkCategory::Additional;

        self.add_language("Dart", Additional, &[("Flutter", &["flutter"])]);
        self.add_language("C++", Additional, &[("Qt", &["qt-", "-qt"])]);
        self.add_language(
            "JavaScript",
            Additional,
            &[("Express", &["express"]), ("Node.js", &["node"])],
        );
        self.add_language("Kotlin", Additional, &[("Ktor", &["ktor"])]);
        self.add_language("SCSS", Additional, &[("Sass", &["scss", "sass"])]);
    }

    fn init_data_analytics(&mut self) {
        use FrameworkCategory::DataAnalytics;

        self.add_language(
            "Jupyter Notebook",
            DataAnalytics,
            &[
                ("Scikit-learn", &["machine-learning", "sklearn", "ml-"]),
                ("Apache Spark", &["big-data", "spark"]),
                ("Pandas", &["pandas", "analysis"]),
            ],
        );
        self.add_language(
            "Python",
            DataAnalytics,
            &[
                ("PyTorch", &["torch"]),
                ("TensorFlow", &["tensorflow"]),
                ("FastAPI", &["fastapi"]),
                ("Django", &["django"]),
                ("Flask", &["flask"]),
            ],
        );
        self.add_language("R", DataAnalytics, &[("Shiny", &["shiny"])]);
    }

    fn init_overrides(&mut self) {
        self.add_override("leptos", "Rust", "Leptos");
        self.add_override("ketchapp-flutter", "Dart", "Flutter");
        self.add_override("kafka", "Java", "Apache Kafka");
        self.add_override("discord", "Rust", "Serenity");
        self.add_override("github.io", "SCSS", "Jekyll");
    }

    pub fn add_language(
        &mut self,
        language: &str,
        category: FrameworkCategory,
        frameworks: &[(&str, &[&str])],
    ) {
        let frameworks = frameworks
            .iter()
            .map(|(name, keywords)| FrameworkRule {
                name: name.to_string(),
                keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();

        self.languages.push(LanguageRule {
            language: language.to_string(),
            category,
            frameworks,
        });
    }

    pub fn add_override(&mut self, pattern: &str, language: &str, framework: &str) {
        self.overrides.push(NameOverride {
            pattern: pattern.to_lowercase(),
            language: language.to_string(),
            framework: framework.to_string(),
        });
    }

    pub fn languages(&self) -> &[LanguageRule] {
        &self.languages
    }

    pub fn overrides(&self) -> &[NameOverride] {
        &self.overrides
    }

    pub fn category_of(&self, language: &str) -> FrameworkCategory {
        self.languages
            .iter()
            .find(|rule| rule.language == language)
            .map(|rule| rule.category)
            .unwrap_or(FrameworkCategory::Additional)
    }

    pub fn find_override(&self, lowercase_name: &str) -> Option<&NameOverride> {
        self.overrides
            .iter()
            .find(|o| lowercase_name.contains(o.pattern.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rust_frameworks_in_priority_order() {
        let table = RuleTable::new();
        let rust = table
            .languages()
            .iter()
            .find(|r| r.language == "Rust")
            .unwrap();
        let names: Vec<_> = rust.frameworks.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Leptos", "Dioxus", "Sycamore", "Actix", "Tokio", "Axum", "GPUI"]
        );
    }

    #[test]
    fn test_category_is_property_of_language() {
        let table = RuleTable::new();
        assert_eq!(table.category_of("Rust"), FrameworkCategory::Primary);
        assert_eq!(table.category_of("Dart"), FrameworkCategory::Additional);
        assert_eq!(table.category_of("Jupyter Notebook"), FrameworkCategory::DataAnalytics);
        assert_eq!(table.category_of("Brainfuck"), FrameworkCategory::Additional);
    }

    #[test]
    fn test_override_patterns_are_lowercased() {
        let mut table = RuleTable::empty();
        table.add_override("MyApp", "Rust", "Axum");
        assert!(table.find_override("legacy-myapp-v2").is_some());
        assert!(table.find_override("other").is_none());
    }
}
