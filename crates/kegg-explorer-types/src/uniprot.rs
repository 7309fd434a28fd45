//! UniProt protein/gene search payloads.
//!
//! The canonical search body is the paginated `{ result, total, page, size }`
//! page. The older `{ results: [{ name, link }] }` shape is not accepted.

use serde::{Deserialize, Serialize};

use crate::{CheckShape, ShapeError};

/// Gene names attached to a protein entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered_locus_names: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mol_weight: Option<u64>,
}

/// One protein entry returned by the search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResultItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_accession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_description: Option<String>,
    #[serde(default)]
    pub genes: Vec<GeneName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Sequence>,
}

/// A page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub result: Vec<QueryResultItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl SearchPage {
    /// Number of individual genes across all entries (one table row each).
    pub fn gene_count(&self) -> usize {
        self.result.iter().map(|item| item.genes.len()).sum()
    }
}

impl CheckShape for SearchPage {
    fn check_shape(&self) -> Result<(), ShapeError> {
        Ok(())
    }
}
