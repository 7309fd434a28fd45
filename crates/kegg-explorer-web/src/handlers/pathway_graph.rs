//! GET /api/kegg/pathway_graph/:pathway_id: nodes and edges of a pathway map.

use axum::{
    extract::{Path, State},
    Json,
};
use kegg_explorer_types::PathwayGraph;

use super::non_blank;
use crate::error::ProxyError;
use crate::state::AppState;

const MISSING_PATHWAY_ID: &str = "Pathway ID is missing or blank";

pub async fn pathway_graph(
    State(state): State<AppState>,
    Path(pathway_id): Path<String>,
) -> Result<Json<PathwayGraph>, ProxyError> {
    let pathway_id =
        non_blank(Some(pathway_id.as_str())).ok_or(ProxyError::MissingParameter(MISSING_PATHWAY_ID))?;

    tracing::info!(pathway_id, "Fetching pathway graph");

    let graph = state.upstream.pathway_graph(pathway_id).await?;

    tracing::debug!(
        "Pathway {} graph: {} nodes, {} edges",
        graph.id,
        graph.nodes.len(),
        graph.edges.len()
    );
    Ok(Json(graph))
}

pub async fn missing_pathway_id() -> ProxyError {
    ProxyError::MissingParameter(MISSING_PATHWAY_ID)
}
