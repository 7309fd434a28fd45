//! GET /api/search: free-text protein/gene search.
//!
//! ```text
//! GET /api/search?query=BC_0002&page=1&page_size=10
//! ```

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use kegg_explorer_types::SearchPage;
use serde::Deserialize;

use super::non_blank;
use crate::error::ProxyError;
use crate::state::AppState;

/// Query params for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    /// 1-based page number, forwarded as `page_num`
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchPage>, ProxyError> {
    let Query(params) = params.map_err(|e| ProxyError::InvalidParameter(e.body_text()))?;

    let query = non_blank(params.query.as_deref()).ok_or(ProxyError::MissingParameter("Missing query"))?;

    tracing::info!(query, page = ?params.page, page_size = ?params.page_size, "Searching genes");

    let page = state
        .upstream
        .search(query, params.page, params.page_size)
        .await?;

    tracing::debug!(
        "Search for {:?} returned {} entries",
        query,
        page.result.len()
    );
    Ok(Json(page))
}
