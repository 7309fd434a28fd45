//! Proxy API client
//!
//! The fetch units only see [`ProxyApi`]; [`HttpProxyApi`] is the reqwest
//! implementation used by the binary, tests swap in a fake.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::fetch::FetchError;

pub type Result<T> = std::result::Result<T, FetchError>;

/// A proxy route plus its parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Search { query: String },
    PathwaysForGene { gen_id: String },
    PathwayGraph { pathway_id: String },
}

impl Endpoint {
    /// Resolve against the proxy base URL; identifiers are percent-encoded.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            match self {
                Endpoint::Search { .. } => {
                    path.extend(["api", "search"]);
                }
                Endpoint::PathwaysForGene { gen_id } => {
                    path.extend(["api", "kegg", "pathways_for_gene"]).push(gen_id);
                }
                Endpoint::PathwayGraph { pathway_id } => {
                    path.extend(["api", "kegg", "pathway_graph"]).push(pathway_id);
                }
            }
        }
        if let Endpoint::Search { query } = self {
            url.query_pairs_mut().append_pair("query", query);
        }
        url
    }
}

/// Status and body of a proxy response, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait ProxyApi: Send + Sync {
    /// One GET against the proxy. Only transport failures are errors here;
    /// a non-2xx status comes back as a normal [`RawResponse`].
    async fn get_raw(&self, endpoint: &Endpoint) -> Result<RawResponse>;
}

/// HTTP client for the explorer proxy
pub struct HttpProxyApi {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpProxyApi {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// `timeout` bounds each whole request, body included.
    pub fn new(base_url: Url, timeout: Duration) -> anyhow::Result<Self> {
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Proxy URL cannot carry a path: {base_url}");
        }
        if timeout.is_zero() {
            anyhow::bail!("Request timeout must be greater than zero");
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl ProxyApi for HttpProxyApi {
    async fn get_raw(&self, endpoint: &Endpoint) -> Result<RawResponse> {
        let url = endpoint.url(&self.base_url);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request to {} failed: {}", url, e);
                FetchError::Transport(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}
