//! Catalog connection settings.
//!
//! Everything here has a default from [`consts`](crate::consts); the binary
//! overrides individual values from command-line flags. Nothing is read from
//! the environment or from disk.

use anyhow::{Context, Result, bail};
use reqwest::Url;
use std::time::Duration;

use crate::consts::{DEFAULT_PRODUCT_URL, DEFAULT_SEARCH_URL, DEFAULT_TIMEOUT_SECS, user_agent};

/// Where and how to reach the product catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub search_url: Url,
    pub product_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl CatalogConfig {
    /// Build a config from endpoint strings. Both must be absolute http(s) URLs.
    pub fn new(search_url: &str, product_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            search_url: parse_endpoint(search_url).context("invalid search URL")?,
            product_url: parse_endpoint(product_url).context("invalid product URL")?,
            timeout,
            user_agent: user_agent(),
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            search_url: Url::parse(DEFAULT_SEARCH_URL).expect("default search URL is valid"),
            product_url: Url::parse(DEFAULT_PRODUCT_URL).expect("default product URL is valid"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: user_agent(),
        }
    }
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("cannot parse {raw:?}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("unsupported scheme {other:?} in {raw:?}"),
    }
}
