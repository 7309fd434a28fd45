//! Proxy configuration, read from the environment.
//!
//!   UPSTREAM_BASE_URL      upstream gene/pathway service (default: http://localhost:8000)
//!   EXPLORER_BIND_ADDR     listen address (default: 0.0.0.0:3000)
//!   UPSTREAM_TIMEOUT_SECS  per-request upstream timeout (default: 30)

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use url::Url;

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub upstream_base_url: Url,
    pub bind_addr: SocketAddr,
    pub upstream_timeout: Duration,
}

impl ProxyConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| -> String {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => value.trim().to_string(),
                _ => {
                    tracing::info!("{key} not set, using default: {default}");
                    default.to_string()
                }
            }
        };

        let upstream_base_url = parse_base_url(&read("UPSTREAM_BASE_URL", DEFAULT_UPSTREAM_BASE_URL))?;

        let bind_addr = read("EXPLORER_BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .context("Invalid EXPLORER_BIND_ADDR")?;

        let timeout_secs = read(
            "UPSTREAM_TIMEOUT_SECS",
            &DEFAULT_UPSTREAM_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .context("Invalid UPSTREAM_TIMEOUT_SECS")?;
        if timeout_secs == 0 {
            bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            upstream_base_url,
            bind_addr,
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Parse and sanity-check the upstream base URL.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Invalid upstream base URL: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Upstream base URL must be http or https, got {}", url.scheme());
    }
    if url.cannot_be_a_base() {
        bail!("Upstream base URL cannot carry a path: {raw}");
    }
    Ok(url)
}
