use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::path::Path;

use crate::error::{Error, Result};

/// Checked in order; the first non-empty value wins.
pub const TOKEN_ENV_VARS: [&str; 3] = ["GITHUB_TOKEN", "GH_TOKEN", "GITHUB_PAT"];

pub const DEFAULT_USERNAME: &str = "alessandrobrunoh";
pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_BYTES_PER_LINE: u64 = 40;
pub const DEFAULT_TOP_LANGUAGES: usize = 10;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

fn default_excluded_languages() -> Vec<String> {
    ["HTML", "CSS", "Makefile", "Dockerfile"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_bytes_per_line() -> u64 {
    DEFAULT_BYTES_PER_LINE
}

fn default_top_languages() -> usize {
    DEFAULT_TOP_LANGUAGES
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExcludedRepository {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        reason: Option<String>,
    },
}

impl ExcludedRepository {
    pub fn name(&self) -> &str {
        match self {
            ExcludedRepository::Name(name) => name,
            ExcludedRepository::Detailed { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExclusionConfig {
    #[serde(default)]
    pub excluded_repositories: Vec<ExcludedRepository>,
    #[serde(default = "default_excluded_languages")]
    pub excluded_languages: Vec<String>,
    #[serde(default)]
    pub included_organizations: Vec<String>,
    #[serde(default = "default_bytes_per_line")]
    pub bytes_per_line: u64,
    #[serde(default = "default_top_languages")]
    pub top_languages: usize,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            excluded_repositories: Vec::new(),
            excluded_languages: default_excluded_languages(),
            included_organizations: Vec::new(),
            bytes_per_line: DEFAULT_BYTES_PER_LINE,
            top_languages: DEFAULT_TOP_LANGUAGES,
        }
    }
}

impl ExclusionConfig {
    pub fn parse(document: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(document)
            .map_err(|e| Error::Config(format!("Malformed exclusion config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the document at `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(
                "No exclusion config at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let document = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&document)
    }

    fn validate(&self) -> Result<()> {
        if self.bytes_per_line == 0 {
            return Err(Error::Config("bytes_per_line must be greater than 0".to_string()));
        }
        if self.top_languages == 0 {
            return Err(Error::Config("top_languages must be greater than 0".to_string()));
        }
        if self.excluded_languages.iter().any(|l| l.trim().is_empty()) {
            return Err(Error::Config("excluded_languages contains an empty name".to_string()));
        }
        if self
            .excluded_repositories
            .iter()
            .any(|r| r.name().trim().is_empty())
        {
            return Err(Error::Config(
                "excluded_repositories contains an empty name".to_string(),
            ));
        }
        if self.included_organizations.iter().any(|o| o.trim().is_empty()) {
            return Err(Error::Config(
                "included_organizations contains an empty name".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub github_token: Option<String>,
    pub http_timeout_secs: u64,
    pub exclusions: ExclusionConfig,
}

impl Config {
    pub fn from_env(config_path: impl AsRef<Path>) -> Result<Self> {
        Self::from_lookup(config_path, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(config_path: impl AsRef<Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let github_token = TOKEN_ENV_VARS.iter().find_map(|key| non_empty(*key));
        if github_token.is_none() {
            tracing::warn!("No GitHub token found, requests are subject to anonymous rate limits");
        }

        let username = non_empty("GITHUB_USERNAME")
            .or_else(|| non_empty("GITHUB_REPOSITORY_OWNER"))
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        let http_timeout_secs = match non_empty("LANGRANK_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                Error::Config(format!("LANGRANK_HTTP_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let exclusions = ExclusionConfig::load(config_path)?;

        Ok(Self {
            username,
            github_token,
            http_timeout_secs,
            exclusions,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub username: String,
    pub excluded_languages: BTreeSet<String>,
    pub excluded_repositories: BTreeSet<String>,
    pub bytes_per_line: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let exclusions = ExclusionConfig::default();
        Self {
            username: DEFAULT_USERNAME.to_string(),
            excluded_languages: exclusions.excluded_languages.into_iter().collect(),
            excluded_repositories: BTreeSet::new(),
            bytes_per_line: exclusions.bytes_per_line,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            username: config.username.clone(),
            excluded_languages: config.exclusions.excluded_languages.iter().cloned().collect(),
            excluded_repositories: config
                .exclusions
                .excluded_repositories
                .iter()
                .map(|r| r.name().to_string())
                .collect(),
            bytes_per_line: config.exclusions.bytes_per_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_parse_mixed_excluded_repositories() {
        let config = ExclusionConfig::parse(
            r#"{
                "excluded_repositories": [
                    "My-Zed-IDE-Snippets",
                    {"name": "releases", "reason": "binary artifacts only"}
                ],
                "excluded_languages": ["HTML"]
            }"#,
        )
        .unwrap();

        let names: Vec<_> = config.excluded_repositories.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["My-Zed-IDE-Snippets", "releases"]);
        assert_eq!(config.excluded_languages, vec!["HTML".to_string()]);
        assert_eq!(config.bytes_per_line, DEFAULT_BYTES_PER_LINE);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ExclusionConfig::parse("{}").unwrap();
        assert_eq!(config.excluded_languages, default_excluded_languages());
        assert_eq!(config.top_languages, DEFAULT_TOP_LANGUAGES);
    }

    #[test]
    fn test_malformed_document_is_config_error() {
        let err = ExclusionConfig::parse(r#"{"excluded_languages": "HTML"}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = ExclusionConfig::parse(r#"{"bytes_per_line": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExclusionConfig::load(dir.path().join("absent.json")).unwrap();
        assert!(config.excluded_repositories.is_empty());
    }

    #[test]
    fn test_token_priority_skips_empty_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::from_lookup(
            &path,
            lookup(&[("GITHUB_TOKEN", "  "), ("GH_TOKEN", "gh-token"), ("GITHUB_PAT", "pat")]),
        )
        .unwrap();
        assert_eq!(config.github_token.as_deref(), Some("gh-token"));

        let config = Config::from_lookup(&path, lookup(&[])).unwrap();
        assert!(config.github_token.is_none());
        assert_eq!(config.username, DEFAULT_USERNAME);
    }

    #[test]
    fn test_username_and_timeout_from_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::from_lookup(
            &path,
            lookup(&[
                ("GITHUB_REPOSITORY_OWNER", "owner"),
                ("LANGRANK_HTTP_TIMEOUT_SECS", "5"),
            ]),
        )
        .unwrap();
        assert_eq!(config.username, "owner");
        assert_eq!(config.http_timeout_secs, 5);

        let err = Config::from_lookup(&path, lookup(&[("LANGRANK_HTTP_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_pipeline_config_collects_exclusions() {
        let config = Config {
            username: "octo".to_string(),
            github_token: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            exclusions: ExclusionConfig::parse(
                r#"{"excluded_repositories": ["b", "a"], "excluded_languages": ["Vue"]}"#,
            )
            .unwrap(),
        };

        let pipeline = PipelineConfig::from(&config);
        assert_eq!(
            pipeline.excluded_repositories.into_iter().collect::<Vec<_>>(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert!(pipeline.excluded_languages.contains("Vue"));
    }
}
