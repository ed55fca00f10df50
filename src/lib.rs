pub mod aggregator;
pub mod cache;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod github;
pub mod models;
pub mod render;
pub mod server;
pub mod types;
pub mod viewer;
