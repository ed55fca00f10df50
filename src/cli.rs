use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::models::Category;
use crate::viewer::SortKey;

#[derive(Parser)]
#[command(name = "star-ranking")]
#[command(about = "Star Ranking - Ranks frontend projects on GitHub by stars")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the aggregator HTTP server
    Serve {
        /// Address to bind
        #[arg(long, env = "STAR_RANKING_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,

        /// GitHub token sent as a bearer credential
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        github_token: Option<String>,

        /// GitHub API root
        #[arg(long, env = "GITHUB_API_URL", default_value = crate::github::API_BASE_URL)]
        github_api_url: String,
    },

    /// Fetch the ranking from an aggregator and print it
    View {
        /// Aggregator server root
        #[arg(long, env = "STAR_RANKING_ENDPOINT", default_value = "http://127.0.0.1:3000")]
        endpoint: String,

        /// Only show one category (see `categories`)
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,

        #[arg(long, value_enum, default_value_t = SortKey::Stars)]
        sort: SortKey,

        /// Directory for the local cache
        #[arg(long, env = "STAR_RANKING_CACHE_DIR")]
        cache_dir: Option<PathBuf>,

        /// Keep the cache in memory for this run only
        #[arg(long)]
        no_cache: bool,

        /// Ignore any cached data and fetch again
        #[arg(long)]
        refresh: bool,
    },

    /// List the recognized categories
    Categories,
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse().map_err(|e: crate::error::RankingError| e.to_string())
}
