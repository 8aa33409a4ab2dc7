//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::pagination::{Pagination, DEFAULT_LIMIT, MAX_LIMIT};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Page size when a listing request gives no usable `limit`
    pub page_default_limit: usize,
    /// Largest page size a listing request may ask for
    pub page_max_limit: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `PAGE_DEFAULT_LIMIT` - Default page size (default: 10)
    /// - `PAGE_MAX_LIMIT` - Maximum page size (default: 100)
    ///
    /// Unparsable values fall back to their defaults. A zero page size is
    /// treated as unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            page_default_limit: positive_env_or("PAGE_DEFAULT_LIMIT", defaults.page_default_limit),
            page_max_limit: positive_env_or("PAGE_MAX_LIMIT", defaults.page_max_limit),
        }
    }

    /// Pagination policy built from the page settings.
    ///
    /// The default page size never exceeds the maximum.
    pub fn pagination(&self) -> Pagination {
        Pagination {
            default_limit: self.page_default_limit.min(self.page_max_limit),
            max_limit: self.page_max_limit,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn positive_env_or(name: &str, default: usize) -> usize {
    match env_or(name, default) {
        0 => default,
        n => n,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            page_default_limit: DEFAULT_LIMIT,
            page_max_limit: MAX_LIMIT,
        }
    }
}
