//! GET /api/kegg/pathways_for_gene/:gen_id: KEGG pathways for one gene.
//!
//! Upstream `{ entry, name, pathways }` is returned as
//! `{ geneId, geneName, pathways }`.

use axum::{
    extract::{Path, State},
    Json,
};
use kegg_explorer_types::GeneWithPathways;

use super::non_blank;
use crate::error::ProxyError;
use crate::state::AppState;

const MISSING_GENE_ID: &str = "genId is required";

pub async fn pathways_for_gene(
    State(state): State<AppState>,
    Path(gen_id): Path<String>,
) -> Result<Json<GeneWithPathways>, ProxyError> {
    let gen_id = non_blank(Some(gen_id.as_str())).ok_or(ProxyError::MissingParameter(MISSING_GENE_ID))?;

    tracing::info!(gen_id, "Fetching pathways for gene");

    let gene = state.upstream.gene_pathways(gen_id).await?;

    tracing::debug!(
        "Gene {} ({:?}) has {} pathways",
        gene.gene_id,
        gene.gene_name,
        gene.pathways.len()
    );
    Ok(Json(gene))
}

/// Matches the route with an empty `:gen_id` segment.
pub async fn missing_gene_id() -> ProxyError {
    ProxyError::MissingParameter(MISSING_GENE_ID)
}
