use serde::Deserialize;

// GitHub API response structures.
//
// Every field is defaulted so that a payload missing fields still narrows into
// a summary instead of failing the whole lookup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GitHubRepo {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u64,
    pub language: Option<String>,
    pub owner: GitHubOwner,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GitHubOwner {
    pub login: String,
    pub avatar_url: String,
}
