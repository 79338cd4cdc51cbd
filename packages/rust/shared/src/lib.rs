//! Shared types, error model, and configuration for regsum.
//!
//! This crate is the foundation depended on by all other regsum crates.
//! It provides:
//! - [`RegSumError`], the unified error type
//! - Domain types ([`SectionNumber`], [`RawParagraph`])
//! - Configuration ([`AppConfig`], [`RankingConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BuildConfig, RankingConfig, SourceConfig, SourceFormat, config_dir,
    config_file_path, init_config, init_config_in, load_config, load_config_from,
};
pub use error::{RegSumError, Result};
pub use types::{RawParagraph, SectionNumber};
