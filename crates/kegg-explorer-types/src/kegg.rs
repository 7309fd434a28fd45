//! KEGG gene → pathway and pathway → graph payloads.

use serde::{Deserialize, Serialize};

use crate::{require_non_blank, CheckShape, ShapeError};

// ============================================================================
// GENE → PATHWAYS
// ============================================================================

/// One pathway a gene participates in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayEntry {
    /// e.g. "bce00010" (organism specific) or "map00010" (reference)
    pub pathway_id: String,
    pub pathway_name: String,
}

/// Gene record exactly as the upstream KEGG service returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamGeneRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub entry: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    pub pathways: Vec<PathwayEntry>,
}

impl CheckShape for UpstreamGeneRecord {
    fn check_shape(&self) -> Result<(), ShapeError> {
        require_non_blank(&self.entry, "entry")?;
        check_pathway_entries(&self.pathways)
    }
}

/// Gene with its pathways, in the shape the explorer client consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneWithPathways {
    pub gene_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_definition: Option<String>,
    pub pathways: Vec<PathwayEntry>,
}

impl From<UpstreamGeneRecord> for GeneWithPathways {
    fn from(record: UpstreamGeneRecord) -> Self {
        Self {
            gene_id: record.entry,
            gene_name: record.name,
            gene_definition: record.definition,
            pathways: record.pathways,
        }
    }
}

impl CheckShape for GeneWithPathways {
    fn check_shape(&self) -> Result<(), ShapeError> {
        require_non_blank(&self.gene_id, "geneId")?;
        check_pathway_entries(&self.pathways)
    }
}

fn check_pathway_entries(pathways: &[PathwayEntry]) -> Result<(), ShapeError> {
    for (index, pathway) in pathways.iter().enumerate() {
        if pathway.pathway_id.trim().is_empty() {
            return Err(ShapeError::BlankEntryField {
                field: "pathways",
                index,
                inner: "pathway_id",
            });
        }
    }
    Ok(())
}

// ============================================================================
// PATHWAY GRAPH
// ============================================================================

/// A node in a KEGG pathway graph (gene, compound, map, ortholog...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeggNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// A directed connection between two [`KeggNode`] ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeggEdge {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Graph data for one pathway map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayGraph {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "pathwayName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pathway_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organism_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub nodes: Vec<KeggNode>,
    pub edges: Vec<KeggEdge>,
}

impl PathwayGraph {
    /// Best display name: `pathwayName`, then `name`.
    pub fn display_name(&self) -> Option<&str> {
        self.pathway_name
            .as_deref()
            .or(self.name.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

impl CheckShape for PathwayGraph {
    fn check_shape(&self) -> Result<(), ShapeError> {
        require_non_blank(&self.id, "_id")?;
        for (index, node) in self.nodes.iter().enumerate() {
            if node.id.trim().is_empty() {
                return Err(ShapeError::BlankEntryField {
                    field: "nodes",
                    index,
                    inner: "id",
                });
            }
        }
        Ok(())
    }
}
