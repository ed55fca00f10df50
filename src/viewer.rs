use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

use crate::cache::{clear_cached, read_cached, write_cached, CacheStore};
use crate::error::{RankingError, Result};
use crate::models::{Category, RepositorySummary};
use crate::render::format_count;
use crate::server::REPOS_PATH;

/// Supplies the ranked dataset to the viewer. The aggregator over HTTP in production.
#[async_trait]
pub trait DatasetFetcher: Send + Sync {
    async fn fetch_repos(&self) -> Result<Vec<RepositorySummary>>;
}

/// HTTP client for a running aggregator
pub struct AggregatorClient {
    client: Client,
    endpoint: Url,
}

impl AggregatorClient {
    /// `base_url` is where the aggregator is mounted, e.g. `http://127.0.0.1:3000`
    /// or `http://host/dash/`. Any path prefix is kept.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join(REPOS_PATH.trim_start_matches('/'))?;
        let client = Client::builder()
            .user_agent(concat!("star-ranking/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl DatasetFetcher for AggregatorClient {
    async fn fetch_repos(&self) -> Result<Vec<RepositorySummary>> {
        let response = self.client.get(self.endpoint.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RankingError::FetchFailed(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    /// Most stars first
    #[default]
    Stars,
    /// Alphabetical by repository name
    Name,
}

/// Gap between a row and the row ranked immediately above it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarDeficit {
    pub stars: u64,
    pub percent: f64,
}

impl StarDeficit {
    pub fn between(previous: u64, current: u64) -> Self {
        let stars = previous.saturating_sub(current);
        let percent = if previous == 0 {
            0.0
        } else {
            stars as f64 / previous as f64 * 100.0
        };
        Self { stars, percent }
    }
}

impl fmt::Display for StarDeficit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stars less ({:.1}%)", format_count(self.stars), self.percent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow<'a> {
    /// 1-based position in the current view
    pub rank: usize,
    pub repo: &'a RepositorySummary,
    pub deficit: Option<StarDeficit>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<'a> {
    Loading,
    Error(String),
    Empty,
    Ranked(Vec<RankedRow<'a>>),
}

/// Client-side state: the fetched dataset plus the user's filter and sort choice.
pub struct Viewer {
    fetcher: Arc<dyn DatasetFetcher>,
    store: Arc<dyn CacheStore>,
    dataset: Option<Vec<RepositorySummary>>,
    error: Option<String>,
    from_cache: bool,
    pub selected_category: Option<Category>,
    pub sort_by: SortKey,
}

impl Viewer {
    pub fn new(fetcher: Arc<dyn DatasetFetcher>, store: Arc<dyn CacheStore>) -> Self {
        Self {
            fetcher,
            store,
            dataset: None,
            error: None,
            from_cache: false,
            selected_category: None,
            sort_by: SortKey::default(),
        }
    }

    pub async fn load(&mut self) {
        self.load_at(chrono::Utc::now().timestamp_millis()).await
    }

    /// Cache-aware load: a fresh cache entry wins, otherwise hit the aggregator
    /// and cache what it returns.
    pub async fn load_at(&mut self, now_ms: i64) {
        if let Some(data) = read_cached(self.store.as_ref(), now_ms) {
            info!("Loaded {} repos from cache", data.len());
            self.dataset = Some(data);
            self.error = None;
            self.from_cache = true;
            return;
        }

        match self.fetcher.fetch_repos().await {
            Ok(data) => {
                if let Err(e) = write_cached(self.store.as_ref(), &data, now_ms) {
                    warn!("Failed to write cache: {}", e);
                }
                info!("Fetched {} repos", data.len());
                self.dataset = Some(data);
                self.error = None;
                self.from_cache = false;
            }
            Err(e) => {
                error!("Error fetching repos: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    /// Drop the cached entry and fetch again
    pub async fn refresh_at(&mut self, now_ms: i64) {
        clear_cached(self.store.as_ref());
        self.load_at(now_ms).await
    }

    pub fn dataset(&self) -> Option<&[RepositorySummary]> {
        self.dataset.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_from_cache(&self) -> bool {
        self.from_cache
    }

    /// The dataset after the category filter and sort are applied
    pub fn visible(&self) -> Vec<&RepositorySummary> {
        let mut repos: Vec<&RepositorySummary> = self
            .dataset
            .iter()
            .flatten()
            .filter(|repo| self.selected_category.map_or(true, |c| repo.category == c))
            .collect();

        match self.sort_by {
            SortKey::Stars => repos.sort_by(|a, b| b.stars.cmp(&a.stars)),
            SortKey::Name => repos.sort_by_cached_key(|repo| repo.name.to_lowercase()),
        }
        repos
    }

    pub fn view_state(&self) -> ViewState<'_> {
        if let Some(message) = &self.error {
            return ViewState::Error(message.clone());
        }
        if self.dataset.is_none() {
            return ViewState::Loading;
        }

        let visible = self.visible();
        if visible.is_empty() {
            return ViewState::Empty;
        }

        // Deficits only make sense when rows are ordered by stars.
        let with_deficit = self.sort_by == SortKey::Stars;
        let rows = visible
            .iter()
            .enumerate()
            .map(|(i, &repo)| RankedRow {
                rank: i + 1,
                repo,
                deficit: match i {
                    0 => None,
                    _ if !with_deficit => None,
                    _ => Some(StarDeficit::between(visible[i - 1].stars, repo.stars)),
                },
            })
            .collect();

        ViewState::Ranked(rows)
    }
}
