//! Pure rendering of a [`Report`] into the JSON and Markdown documents.

use crate::config::DEFAULT_TOP_LANGUAGES;
use crate::error::Result;
use crate::models::{DataSource, FrameworkCategory, Metric, Report, UserStats};

pub const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub json: String,
    pub markdown: String,
}

pub fn render(report: &Report) -> Result<RenderedReport> {
    render_with_limit(report, DEFAULT_TOP_LANGUAGES)
}

pub fn render_with_limit(report: &Report, top_languages: usize) -> Result<RenderedReport> {
    Ok(RenderedReport {
        json: render_json(report)?,
        markdown: render_markdown(report, top_languages),
    })
}

pub fn render_json(report: &Report) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

/// Linear bar of `BAR_WIDTH` cells; any non-zero share gets at least one.
pub fn percentage_bar(percentage: f64) -> String {
    let filled = if percentage <= 0.0 {
        0
    } else {
        ((percentage * BAR_WIDTH as f64 / 100.0) as usize).clamp(1, BAR_WIDTH)
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn render_markdown(report: &Report, top_languages: usize) -> String {
    let mut output = String::new();
    let stats = &report.stats;

    output.push_str("## 🔥 Programming Language Rankings\n\n");
    output.push_str(&format!(
        "*Based on analysis of {} repositories ({} owned + {} contributed)*\n\n",
        stats.total_repos, stats.owned_repos, stats.contributed_repos
    ));

    if let DataSource::Fallback { version } = &report.data_source {
        output.push_str(&format!(
            "> ⚠️ Live GitHub data was unavailable; figures come from curated snapshot {}.\n\n",
            version
        ));
    }

    if report.languages.is_empty() {
        output.push_str("No language data available.\n");
    }

    for language in report.languages.iter().take(top_languages) {
        output.push_str(&format!(
            "{}. **{}** - {:.1}% ({} repos)\n",
            language.rank,
            language.name,
            language.percentage,
            language.repository_count()
        ));
        output.push_str(&format!(
            "   `{}` {} bytes (~{} lines)\n\n",
            percentage_bar(language.percentage),
            group_thousands(language.bytes),
            group_thousands(language.lines_estimate)
        ));
    }

    render_frameworks(report, &mut output);
    render_stats(stats, &mut output);

    output
}

fn render_frameworks(report: &Report, output: &mut String) {
    if report.frameworks.is_empty() {
        return;
    }

    output.push_str("\n## 🧰 Frameworks & Technologies\n");

    for category in [
        FrameworkCategory::Primary,
        FrameworkCategory::Additional,
        FrameworkCategory::DataAnalytics,
    ] {
        // (framework, language, repositories) in first-seen order
        let mut groups: Vec<(&str, &str, Vec<&str>)> = Vec::new();
        for tag in report.frameworks.iter().filter(|t| t.category == category) {
            match groups
                .iter_mut()
                .find(|(name, lang, _)| *name == tag.framework_name && *lang == tag.language)
            {
                Some((_, _, repos)) => repos.push(tag.repository.as_str()),
                None => groups.push((
                    tag.framework_name.as_str(),
                    tag.language.as_str(),
                    vec![tag.repository.as_str()],
                )),
            }
        }

        if groups.is_empty() {
            continue;
        }

        output.push_str(&format!("\n**{}**\n\n", category));
        for (framework, language, repos) in groups {
            output.push_str(&format!(
                "- {} ({}): {}\n",
                framework,
                language,
                repos.join(", ")
            ));
        }
    }
}

fn render_stats(stats: &UserStats, output: &mut String) {
    let metric_cell = |metric: Metric, value: u64| {
        if stats.is_unavailable(metric) {
            format!("{}*", group_thousands(value))
        } else {
            group_thousands(value)
        }
    };

    output.push_str("\n## 📊 GitHub Stats\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!(
        "| Total Commits | {} |\n",
        metric_cell(Metric::Commits, stats.total_commits)
    ));
    output.push_str(&format!(
        "| Pull Requests | {} |\n",
        metric_cell(Metric::PullRequests, stats.pull_requests)
    ));
    output.push_str(&format!(
        "| Issues | {} |\n",
        metric_cell(Metric::Issues, stats.issues)
    ));
    output.push_str(&format!(
        "| Total Contributions | {} |\n",
        group_thousands(stats.total_contributions)
    ));
    output.push_str(&format!(
        "| Stars Gained | {} |\n",
        group_thousands(stats.stars_gained)
    ));
    output.push_str(&format!(
        "| Repositories | {} ({} owned + {} contributed) |\n",
        stats.total_repos, stats.owned_repos, stats.contributed_repos
    ));

    if !stats.unavailable_metrics.is_empty() {
        let names: Vec<String> = stats.unavailable_metrics.iter().map(|m| m.to_string()).collect();
        output.push_str(&format!(
            "\n\\* Not available for this run ({}); shown as 0.\n",
            names.join(", ")
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FrameworkTag, RankedLanguage};

    fn report() -> Report {
        Report {
            username: "octo".to_string(),
            data_source: DataSource::Live,
            languages: vec![
                RankedLanguage {
                    rank: 1,
                    name: "Rust".to_string(),
                    percentage: 80.0,
                    bytes: 8000,
                    lines_estimate: 200,
                    repositories: vec!["LeptosApp".to_string()],
                },
                RankedLanguage {
                    rank: 2,
                    name: "Java".to_string(),
                    percentage: 20.0,
                    bytes: 2000,
                    lines_estimate: 50,
                    repositories: vec!["svc".to_string()],
                },
            ],
            frameworks: vec![FrameworkTag {
                category: FrameworkCategory::Primary,
                language: "Rust".to_string(),
                framework_name: "Leptos".to_string(),
                repository: "LeptosApp".to_string(),
            }],
            stats: UserStats {
                total_commits: 1234,
                total_contributions: 1240,
                pull_requests: 6,
                issues: 0,
                stars_gained: 3,
                total_repos: 3,
                owned_repos: 3,
                contributed_repos: 0,
                unavailable_metrics: vec![Metric::Issues],
            },
            excluded_languages: vec!["CSS".to_string()],
            excluded_repositories: Vec::new(),
        }
    }

    #[test]
    fn test_percentage_bar_scaling() {
        assert_eq!(percentage_bar(100.0), "█".repeat(20));
        assert_eq!(percentage_bar(80.0), format!("{}{}", "█".repeat(16), "░".repeat(4)));
        assert_eq!(percentage_bar(0.4), format!("{}{}", "█", "░".repeat(19)));
        assert_eq!(percentage_bar(0.0), "░".repeat(20));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_markdown_lists_ranked_languages() {
        let markdown = render_markdown(&report(), 10);

        assert!(markdown.contains("*Based on analysis of 3 repositories (3 owned + 0 contributed)*"));
        assert!(markdown.contains("1. **Rust** - 80.0% (1 repos)"));
        assert!(markdown.contains("2. **Java** - 20.0% (1 repos)"));
        assert!(markdown.contains("8,000 bytes (~200 lines)"));
        assert!(markdown.contains("- Leptos (Rust): LeptosApp"));
        assert!(!markdown.contains("snapshot"));
    }

    #[test]
    fn test_markdown_respects_top_limit() {
        let markdown = render_markdown(&report(), 1);
        assert!(markdown.contains("**Rust**"));
        assert!(!markdown.contains("**Java**"));
    }

    #[test]
    fn test_unavailable_metric_marked_in_table() {
        let markdown = render_markdown(&report(), 10);
        assert!(markdown.contains("| Total Commits | 1,234 |"));
        assert!(markdown.contains("| Issues | 0* |"));
        assert!(markdown.contains("Not available for this run (issues)"));
    }

    #[test]
    fn test_fallback_notice_and_empty_ranking() {
        let mut report = report();
        report.languages.clear();
        report.data_source = DataSource::Fallback {
            version: "2025.1".to_string(),
        };

        let markdown = render_markdown(&report, 10);
        assert!(markdown.contains("curated snapshot 2025.1"));
        assert!(markdown.contains("No language data available."));
    }

    #[test]
    fn test_json_has_stable_field_names() {
        let json = render_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["languages"][0]["name"], "Rust");
        assert_eq!(value["languages"][0]["percentage"], 80.0);
        assert_eq!(value["frameworks"][0]["category"], "Primary");
        assert_eq!(value["stats"]["total_repos"], 3);
        assert_eq!(value["stats"]["unavailable_metrics"][0], "issues");
        assert_eq!(value["data_source"]["kind"], "live");
        assert!(json.ends_with('\n'));
    }
}
