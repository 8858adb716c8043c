use std::env;
use std::time::Duration;

use crate::error::{CatalogError, Result};

pub const DEFAULT_PRODUCTS_URL: &str = "http://localhost:3001/products";
pub const DEFAULT_COMMENTS_URL: &str = "http://localhost:5001/comments";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const PRODUCTS_URL_ENV: &str = "CATALOG_PRODUCTS_URL";
pub const COMMENTS_URL_ENV: &str = "CATALOG_COMMENTS_URL";
pub const TIMEOUT_ENV: &str = "CATALOG_TIMEOUT_SECS";

/// Where the two resources live and how long a request may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub products_url: String,
    pub comments_url: String,
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            products_url: DEFAULT_PRODUCTS_URL.to_string(),
            comments_url: DEFAULT_COMMENTS_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CatalogConfig {
    /// Start from the defaults and apply any `CATALOG_*` environment overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(PRODUCTS_URL_ENV).filter(|v| !v.is_empty()) {
            config.products_url = url;
        }
        if let Some(url) = lookup(COMMENTS_URL_ENV).filter(|v| !v.is_empty()) {
            config.comments_url = url;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                CatalogError::Config(format!("{TIMEOUT_ENV} must be whole seconds, got {raw:?}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

