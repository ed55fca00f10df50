use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RankingError;

/// Category tag attached to a repository by the catalog, never by GitHub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Meta-Frameworks")]
    MetaFrameworks,
    #[serde(rename = "UI Frameworks")]
    UiFrameworks,
    #[serde(rename = "Build Tools")]
    BuildTools,
    #[serde(rename = "State Management")]
    StateManagement,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [
        Category::MetaFrameworks,
        Category::UiFrameworks,
        Category::BuildTools,
        Category::StateManagement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::MetaFrameworks => "Meta-Frameworks",
            Category::UiFrameworks => "UI Frameworks",
            Category::BuildTools => "Build Tools",
            Category::StateManagement => "State Management",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RankingError::ConfigError(format!("Unknown category: {}", s)))
    }
}

/// One row of the ranking, as served by `/api/github`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub url: String,
    pub language: Option<String>,
    pub owner: RepoOwner,
    pub updated_at: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoOwner {
    pub login: String,
    pub avatar_url: String,
}

/// Dataset persisted by the viewer, stamped with the epoch millis of the fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: Vec<RepositorySummary>,
    pub timestamp: i64,
}
