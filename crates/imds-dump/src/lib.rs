//! imds-dump — walk a cloud instance metadata endpoint into an ordered key/value map.

pub mod client;
pub mod config;
pub mod fetcher;
pub mod render;
pub mod types;

pub use client::HttpClient;
pub use config::{resolve_host, MetadataConfig, DEFAULT_HOST};
pub use fetcher::MetadataFetcher;
pub use render::{render, render_to, to_pretty_json};
pub use types::*;
