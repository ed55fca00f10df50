use async_trait::async_trait;
use futures::future::join_all;
use std::collections::HashSet;
use tracing::{info, warn};

use crate::catalog::{parse_repo_id, RepoSpec};
use crate::error::Result;
use crate::github::GitHubClient;
use crate::models::{Category, RepoOwner, RepositorySummary};
use crate::types::GitHubRepo;

/// Where repository metadata comes from. GitHub in production.
#[async_trait]
pub trait RepoSource: Send + Sync + 'static {
    async fn fetch_repo(&self, owner: &str, name: &str) -> Result<GitHubRepo>;
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn fetch_repo(&self, owner: &str, name: &str) -> Result<GitHubRepo> {
        self.get_repository_info(owner, name).await
    }
}

/// Narrow an upstream payload into a summary.
///
/// Blank `name`/`full_name`/`html_url` fall back to values derived from the
/// configured identifier, so a sparse payload still yields a usable row.
pub fn summarize(
    owner: &str,
    name: &str,
    repo: GitHubRepo,
    category: Category,
) -> RepositorySummary {
    let full_name = non_empty(repo.full_name).unwrap_or_else(|| format!("{}/{}", owner, name));
    let url = non_empty(repo.html_url)
        .unwrap_or_else(|| format!("https://github.com/{}", full_name));

    RepositorySummary {
        name: non_empty(repo.name).unwrap_or_else(|| name.to_string()),
        full_name,
        description: repo.description,
        stars: repo.stargazers_count,
        url,
        language: repo.language,
        owner: RepoOwner {
            login: non_empty(repo.owner.login).unwrap_or_else(|| owner.to_string()),
            avatar_url: repo.owner.avatar_url,
        },
        updated_at: repo.updated_at,
        category,
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Fetch every configured repository concurrently and rank the ones that resolved.
///
/// Individual lookup failures are logged and dropped. The only error returned
/// is a malformed identifier in `repos`, which fails the whole batch before any
/// request is issued.
pub async fn aggregate(
    source: &dyn RepoSource,
    repos: &[RepoSpec],
) -> Result<Vec<RepositorySummary>> {
    let targets = repos
        .iter()
        .map(|spec| parse_repo_id(spec.repo).map(|(owner, name)| (owner, name, spec)))
        .collect::<Result<Vec<_>>>()?;

    info!("Starting GitHub API requests for {} repos", targets.len());

    let lookups = targets.into_iter().map(|(owner, name, spec)| async move {
        match source.fetch_repo(owner, name).await {
            Ok(repo) => Some(summarize(owner, name, repo, spec.category)),
            Err(e) => {
                warn!("Error fetching {}: {}", spec.repo, e);
                None
            }
        }
    });

    let mut seen = HashSet::new();
    let mut ranked: Vec<RepositorySummary> = join_all(lookups)
        .await
        .into_iter()
        .flatten()
        .filter(|summary| seen.insert(summary.full_name.clone()))
        .collect();

    rank_by_stars(&mut ranked);

    info!("Successfully fetched {} repos", ranked.len());
    Ok(ranked)
}

/// Stable sort, most stars first.
pub fn rank_by_stars(repos: &mut [RepositorySummary]) {
    repos.sort_by(|a, b| b.stars.cmp(&a.stars));
}
