//! Shared types, error model, and configuration for sourcelens.
//!
//! This crate is the foundation depended on by all other sourcelens crates.
//! It provides:
//! - [`SourceLensError`] — the unified error type
//! - Domain types ([`SourceRow`], [`ArticleNode`], [`Section`], [`Reference`],
//!   [`BiasDistribution`])
//! - Configuration ([`AppConfig`], [`RunPaths`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, PathsConfig, RunPaths, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{Result, SourceLensError};
pub use types::{
    Article, ArticleNode, BiasCategory, BiasCounts, BiasDistribution, Platform, Reference,
    Section, SourceRow,
};
