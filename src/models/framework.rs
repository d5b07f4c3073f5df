use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrameworkCategory {
    Primary,
    Additional,
    DataAnalytics,
}

impl std::fmt::Display for FrameworkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameworkCategory::Primary => write!(f, "Primary"),
            FrameworkCategory::Additional => write!(f, "Additional"),
            FrameworkCategory::DataAnalytics => write!(f, "Data & Analytics"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkTag {
    pub category: FrameworkCategory,
    pub language: String,
    pub framework_name: String,
    pub repository: String,
}
