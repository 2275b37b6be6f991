//! Project configuration for stylemill
//!
//! Provides types and parsing for `stylemill.toml`, plus the shared
//! configuration error type.

pub mod loader;
pub mod schema;

pub use loader::{
    default_config, find_config, find_config_from, load_config, merge_cli_overrides,
    resolve_path, CliOverrides, ConfigError,
};
pub use schema::*;
