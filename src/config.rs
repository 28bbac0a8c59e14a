//! Runtime Configuration
//!
//! Settings come from environment variables, falling back to defaults:
//!
//! | Variable                 | Default                    |
//! |--------------------------|----------------------------|
//! | `SHOP_API_URL`           | `https://fakestoreapi.com` |
//! | `SHOP_BIND_ADDR`         | `0.0.0.0:8000`             |
//! | `SHOP_DATA_DIR`          | unset (in-memory storage)  |
//! | `SHOP_HTTP_TIMEOUT_SECS` | `15`                       |
//!
//! Log filtering is controlled separately through `RUST_LOG`.

use crate::catalog::DEFAULT_CATALOG_URL;
use crate::error::ConfigError;
use std::{net::SocketAddr, path::PathBuf, time::Duration};

pub const ENV_API_URL: &str = "SHOP_API_URL";
pub const ENV_BIND_ADDR: &str = "SHOP_BIND_ADDR";
pub const ENV_DATA_DIR: &str = "SHOP_DATA_DIR";
pub const ENV_HTTP_TIMEOUT: &str = "SHOP_HTTP_TIMEOUT_SECS";

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8000);
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct ShopConfig {
    /// Base URL of the product catalog API
    pub api_url: String,

    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,

    /// Directory for persisted cart/wishlist data. `None` keeps them in memory.
    pub data_dir: Option<PathBuf>,

    /// Timeout applied to each catalog request
    pub http_timeout: Duration,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_CATALOG_URL.to_string(),
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            data_dir: None,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ShopConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    var: ENV_API_URL,
                    value: url,
                    reason: "expected an http(s) URL".to_string(),
                });
            }
            config.api_url = url;
        }

        if let Some(addr) = get(ENV_BIND_ADDR) {
            config.bind_addr = addr.parse::<SocketAddr>().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: ENV_BIND_ADDR,
                    value: addr.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        config.data_dir = get(ENV_DATA_DIR).map(PathBuf::from);

        if let Some(secs) = get(ENV_HTTP_TIMEOUT) {
            let parsed: u64 = secs.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: ENV_HTTP_TIMEOUT,
                    value: secs.clone(),
                    reason: e.to_string(),
                }
            })?;
            if parsed == 0 {
                return Err(ConfigError::Invalid {
                    var: ENV_HTTP_TIMEOUT,
                    value: secs,
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.http_timeout = Duration::from_secs(parsed);
        }

        Ok(config)
    }
}
