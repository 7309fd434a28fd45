//! Shared application state
//!
//! The proxy is stateless apart from the upstream client, which owns the
//! connection pool.

use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::upstream::UpstreamClient;

/// Shared application state for the proxy routes
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self {
            upstream: Arc::new(upstream),
        }
    }

    pub fn from_config(config: &ProxyConfig) -> anyhow::Result<Self> {
        let upstream =
            UpstreamClient::new(config.upstream_base_url.clone(), config.upstream_timeout)?;
        Ok(Self::new(upstream))
    }
}
