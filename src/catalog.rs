use crate::error::{RankingError, Result};
use crate::models::Category;

/// A repository the dashboard tracks, as `owner/name`, with its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepoSpec {
    pub repo: &'static str,
    pub category: Category,
}

const fn spec(repo: &'static str, category: Category) -> RepoSpec {
    RepoSpec { repo, category }
}

/// Frontend projects by category
pub const FRONTEND_REPOS: &[RepoSpec] = &[
    spec("vercel/next.js", Category::MetaFrameworks),
    spec("withastro/astro", Category::MetaFrameworks),
    spec("nuxt/nuxt", Category::MetaFrameworks),
    spec("remix-run/remix", Category::MetaFrameworks),
    spec("facebook/react", Category::UiFrameworks),
    spec("vuejs/core", Category::UiFrameworks),
    spec("sveltejs/svelte", Category::UiFrameworks),
    spec("solidjs/solid", Category::UiFrameworks),
    spec("vitejs/vite", Category::BuildTools),
    spec("webpack/webpack", Category::BuildTools),
    spec("evanw/esbuild", Category::BuildTools),
    spec("reduxjs/redux", Category::StateManagement),
    spec("pmndrs/zustand", Category::StateManagement),
    spec("pmndrs/jotai", Category::StateManagement),
];

/// Split an `owner/name` identifier into its two parts.
pub fn parse_repo_id(repo: &str) -> Result<(&str, &str)> {
    match repo.split_once('/') {
        Some((owner, name))
            if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
        {
            Ok((owner, name))
        }
        _ => Err(RankingError::InvalidRepoId(format!(
            "Invalid repository name format: {}",
            repo
        ))),
    }
}

