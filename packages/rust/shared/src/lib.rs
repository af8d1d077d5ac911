//! Shared types, error model, and configuration for channelscope.
//!
//! This crate is the foundation depended on by all other channelscope crates.
//! It provides:
//! - [`ChannelScopeError`] — the unified error type
//! - Domain types ([`ChannelRecord`], [`ChannelType`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DisplayConfig, FilterOptionsConfig, SourceConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{ChannelScopeError, Result};
pub use types::{ChannelRecord, ChannelType, NO_INFORMATION};
