use crate::aggregator::{aggregate, RepoSource};
use crate::catalog::RepoSpec;
use crate::error::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub const REPOS_PATH: &str = "/api/github";

/// Body of a failed `/api/github` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub tracked_repos: usize,
}

/// Liveness probe response (minimal, just indicates the process is running)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

/// Shared state for the aggregator routes
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RepoSource>,
    pub repos: Arc<[RepoSpec]>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(source: Arc<dyn RepoSource>, repos: &[RepoSpec]) -> Self {
        Self {
            source,
            repos: repos.into(),
            start_time: Instant::now(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(REPOS_PATH, get(get_repos))
        .route("/health", get(health_check))
        .route("/livez", get(liveness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the aggregator until `shutdown` resolves
pub async fn start_server<F>(state: AppState, addr: SocketAddr, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Aggregator listening on http://{}{}", listener.local_addr()?, REPOS_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

/// Ranked repositories, or a fixed 500 payload when the batch itself fails
async fn get_repos(State(state): State<AppState>) -> Response {
    match aggregate(state.source.as_ref(), &state.repos).await {
        Ok(repos) => Json(repos).into_response(),
        Err(e) => {
            error!("Error in GitHub API route: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch GitHub data".to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.start_time.elapsed().as_secs(),
            tracked_repos: state.repos.len(),
        }),
    )
}

async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}
