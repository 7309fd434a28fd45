//! Upstream service client
//!
//! HTTP client for the protein-search and KEGG services. One GET per proxy
//! request; no retries, no caching.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use kegg_explorer_types::{
    error_message_from_body, CheckShape, GeneWithPathways, PathwayGraph, SearchPage,
    UpstreamGeneRecord,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ProxyError, Service};

const SEARCH_PATH: &[&str] = &["api", "uniprot", "buscar"];
const GENE_PATHWAYS_PATH: &[&str] = &["kegg"];
const PATHWAY_GRAPH_PATH: &[&str] = &["api", "kegg", "pathways_graph", "pathways_graph"];

/// Upstream error bodies are truncated to this many characters in `detail`.
const MAX_RAW_DETAIL_CHARS: usize = 200;

/// Client for the upstream gene/pathway service
pub struct UpstreamClient {
    http: Client,
    base_url: Url,
}

impl UpstreamClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            bail!("Upstream base URL cannot carry a path: {base_url}");
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Search proteins/genes by free text.
    pub async fn search(
        &self,
        query: &str,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<SearchPage, ProxyError> {
        let mut url = self.endpoint(SEARCH_PATH, None);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            if let Some(page) = page {
                pairs.append_pair("page_num", &page.to_string());
            }
            if let Some(page_size) = page_size {
                pairs.append_pair("page_size", &page_size.to_string());
            }
        }
        self.get_json(Service::Uniprot, url).await
    }

    /// Gene record plus its pathways, renamed to the client shape.
    pub async fn gene_pathways(&self, gen_id: &str) -> Result<GeneWithPathways, ProxyError> {
        let url = self.endpoint(GENE_PATHWAYS_PATH, Some(gen_id));
        let record: UpstreamGeneRecord = self.get_json(Service::Kegg, url).await?;
        Ok(GeneWithPathways::from(record))
    }

    /// Parsed graph of one pathway map.
    pub async fn pathway_graph(&self, pathway_id: &str) -> Result<PathwayGraph, ProxyError> {
        let url = self.endpoint(PATHWAY_GRAPH_PATH, Some(pathway_id));
        self.get_json(Service::Kegg, url).await
    }

    /// Build `{base}/{segments..}/{id}`; `id` is percent-encoded as one segment.
    fn endpoint(&self, segments: &[&str], id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
            if let Some(id) = id {
                path.push(id);
            }
        }
        url
    }

    async fn get_json<T>(&self, service: Service, url: Url) -> Result<T, ProxyError>
    where
        T: DeserializeOwned + CheckShape,
    {
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                let err = ProxyError::from(e);
                tracing::error!("Upstream request to {} failed: {:?}", url, err);
                err
            })?;

        let status = response.status();
        let body = response.text().await?;
        tracing::info!("Upstream {} responded {}", url.path(), status);

        if !status.is_success() {
            let detail = upstream_error_detail(status.as_u16(), status.canonical_reason(), &body);
            tracing::warn!("Upstream error {} for {}: {}", status, url.path(), detail);
            return Err(ProxyError::Upstream {
                service,
                status: status.as_u16(),
                detail,
            });
        }

        decode_body(service, &body)
    }
}

/// Decode a 2xx body; anything unusable is a contract violation (502).
pub fn decode_body<T>(service: Service, body: &str) -> Result<T, ProxyError>
where
    T: DeserializeOwned + CheckShape,
{
    if body.trim().is_empty() {
        return Err(ProxyError::MalformedUpstream {
            service,
            detail: "Received empty successful response from upstream".to_string(),
        });
    }

    let value: T = serde_json::from_str(body).map_err(|e| {
        tracing::error!("Failed to parse upstream response: {}", e);
        ProxyError::MalformedUpstream {
            service,
            detail: malformed_detail(body, &e),
        }
    })?;

    value
        .check_shape()
        .map_err(|e| ProxyError::MalformedUpstream {
            service,
            detail: format!("Received invalid data from upstream: {e}"),
        })?;

    Ok(value)
}

fn malformed_detail(body: &str, err: &serde_json::Error) -> String {
    // The KEGG service answers 200 {"error": "..."} for unknown entries.
    if let Some(message) = error_message_from_body(body) {
        return format!("Upstream reported an error: {message}");
    }
    if err.is_syntax() || err.is_eof() {
        "Received malformed JSON from upstream".to_string()
    } else {
        format!("Received unexpected JSON from upstream: {err}")
    }
}

/// Best-effort human-readable detail for a non-2xx upstream response.
pub fn upstream_error_detail(status: u16, reason: Option<&str>, body: &str) -> String {
    if let Some(message) = error_message_from_body(body) {
        return message;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.chars().take(MAX_RAW_DETAIL_CHARS).collect();
    }
    match reason {
        Some(reason) => reason.to_string(),
        None => format!("Upstream returned status {status} with an empty response body."),
    }
}
