//! agweather core library
//!
//! Shared utilities for the agweather API service:
//! - Configuration loading (XDG-compliant)
//! - Common constants

mod config;

pub use config::{find_config_file, load_config, ConfigSource};

/// Application name used for XDG paths
pub const APP_NAME: &str = "agweather";

/// Default API listen port
pub const DEFAULT_API_PORT: u16 = 5000;
