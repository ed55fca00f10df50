#![allow(dead_code)]

use async_trait::async_trait;
use star_ranking::aggregator::RepoSource;
use star_ranking::error::{RankingError, Result};
use star_ranking::models::{Category, RepoOwner, RepositorySummary};
use star_ranking::types::{GitHubOwner, GitHubRepo};
use star_ranking::viewer::DatasetFetcher;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Upstream payload as GitHub would return it for `owner/name`
pub fn github_repo(full_name: &str, stars: u64) -> GitHubRepo {
    let (owner, name) = full_name.split_once('/').expect("owner/name");
    GitHubRepo {
        name: name.to_string(),
        full_name: full_name.to_string(),
        description: Some(format!("{} description", name)),
        html_url: format!("https://github.com/{}", full_name),
        stargazers_count: stars,
        language: Some("TypeScript".to_string()),
        owner: GitHubOwner {
            login: owner.to_string(),
            avatar_url: format!("https://avatars.githubusercontent.com/{}", owner),
        },
        updated_at: "2024-05-01T12:00:00Z".to_string(),
    }
}

pub fn summary(full_name: &str, stars: u64, category: Category) -> RepositorySummary {
    let (owner, name) = full_name.split_once('/').expect("owner/name");
    RepositorySummary {
        name: name.to_string(),
        full_name: full_name.to_string(),
        description: None,
        stars,
        url: format!("https://github.com/{}", full_name),
        language: None,
        owner: RepoOwner {
            login: owner.to_string(),
            avatar_url: String::new(),
        },
        updated_at: "2024-05-01T12:00:00Z".to_string(),
        category,
    }
}

/// In-memory stand-in for GitHub; identifiers it does not know are 404s.
#[derive(Default)]
pub struct FakeSource {
    repos: HashMap<String, GitHubRepo>,
    pub calls: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(mut self, id: &str, repo: GitHubRepo) -> Self {
        self.repos.insert(id.to_string(), repo);
        self
    }

    pub fn with_stars(self, id: &str, stars: u64) -> Self {
        let repo = github_repo(id, stars);
        self.with_repo(id, repo)
    }
}

#[async_trait]
impl RepoSource for FakeSource {
    async fn fetch_repo(&self, owner: &str, name: &str) -> Result<GitHubRepo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let id = format!("{}/{}", owner, name);
        self.repos
            .get(&id)
            .cloned()
            .ok_or_else(|| RankingError::NotFound(format!("Resource not found: {}", id)))
    }
}

/// Aggregator stand-in for viewer tests; counts how often it is asked.
pub struct FakeFetcher {
    response: Mutex<Result<Vec<RepositorySummary>>>,
    pub calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn ok(data: Vec<RepositorySummary>) -> Self {
        Self {
            response: Mutex::new(Ok(data)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            response: Mutex::new(Err(RankingError::FetchFailed(status))),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_data(&self, data: Vec<RepositorySummary>) {
        *self.response.lock().unwrap() = Ok(data);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatasetFetcher for FakeFetcher {
    async fn fetch_repos(&self) -> Result<Vec<RepositorySummary>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.response.lock().unwrap() {
            Ok(data) => Ok(data.clone()),
            Err(RankingError::FetchFailed(status)) => Err(RankingError::FetchFailed(*status)),
            Err(e) => Err(RankingError::ApiError(e.to_string())),
        }
    }
}

/// Serve `app` on an ephemeral local port and return its address
pub async fn spawn_app(app: axum::Router) -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Ok(addr)
}
