//! Shared types, error model, and configuration for GrowthNews.
//!
//! This crate is the foundation depended on by all other GrowthNews crates.
//! It provides:
//! - [`GrowthNewsError`]: the unified error type
//! - Domain types ([`ContentRecord`], [`NewsletterBundle`], [`IssueSources`])
//! - Configuration ([`AppConfig`], config loading, secret lookup)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BrevoConfig, HttpConfig, OpenAiConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from, read_secret,
};
pub use error::{GrowthNewsError, Result};
pub use types::{ContentKind, ContentRecord, IssueSources, NewsletterBundle, Slot};
