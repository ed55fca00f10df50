use anyhow::Context;
use clap::Parser;
use colored::*;
use star_ranking::cache::{CacheStore, FileStore, MemoryStore};
use star_ranking::catalog::FRONTEND_REPOS;
use star_ranking::cli::{Cli, Command};
use star_ranking::github::GitHubClient;
use star_ranking::models::Category;
use star_ranking::render::RankingView;
use star_ranking::server::{start_server, AppState};
use star_ranking::viewer::{AggregatorClient, Viewer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            bind,
            github_token,
            github_api_url,
        } => {
            println!("{}", "Star Ranking Aggregator".bold().green());
            println!("{}\n", "=".repeat(50).dimmed());

            if github_token.is_none() {
                println!("{}", "No GITHUB_TOKEN set, using unauthenticated requests".yellow());
            }

            let github = GitHubClient::with_base_url(github_token, &github_api_url)
                .context("Failed to create GitHub client")?;
            let state = AppState::new(Arc::new(github), FRONTEND_REPOS);

            println!("📊 Tracking {} repositories", FRONTEND_REPOS.len());
            println!("\nPress Ctrl+C to stop the server\n");

            start_server(state, bind, async {
                let _ = tokio::signal::ctrl_c().await;
                println!("\n🛑 Shutting down server...");
            })
            .await
            .context("Aggregator server failed")?;

            println!("✅ Server stopped");
        }
        Command::View {
            endpoint,
            category,
            sort,
            cache_dir,
            no_cache,
            refresh,
        } => {
            let store: Arc<dyn CacheStore> = if no_cache {
                Arc::new(MemoryStore::new())
            } else {
                let dir = cache_dir
                    .or_else(FileStore::default_dir)
                    .context("No cache directory available; pass --cache-dir or --no-cache")?;
                info!("Using cache directory {}", dir.display());
                Arc::new(FileStore::new(dir))
            };

            let client = AggregatorClient::new(&endpoint)
                .with_context(|| format!("Invalid aggregator endpoint: {}", endpoint))?;
            let mut viewer = Viewer::new(Arc::new(client), store);
            viewer.selected_category = category;
            viewer.sort_by = sort;

            let now = chrono::Utc::now().timestamp_millis();
            if refresh {
                viewer.refresh_at(now).await;
            } else {
                viewer.load_at(now).await;
            }

            print!("{}", RankingView(&viewer));
            if let Some(message) = viewer.error() {
                anyhow::bail!("Failed to load repositories: {}", message);
            }
            if viewer.is_from_cache() {
                println!("\n{}", "(cached, use --refresh to fetch again)".dimmed());
            }
        }
        Command::Categories => {
            for category in Category::ALL {
                println!("{}", category);
            }
        }
    }

    Ok(())
}
