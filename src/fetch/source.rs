//! What each fetch unit fetches, and how its key is derived from the stores.

use std::time::Duration;

use kegg_explorer_types::{CheckShape, GeneWithPathways, PathwayGraph, SearchPage};
use serde::de::DeserializeOwned;

use crate::api::Endpoint;
use crate::selection::{SelectedGene, SelectedPathway};

/// One kind of data a [`FetchUnit`](super::FetchUnit) can load.
pub trait FetchSource: Send + Sync + 'static {
    type Output: DeserializeOwned + CheckShape + std::fmt::Debug + Send + Sync + 'static;

    /// Used in log lines and loading/error text, e.g. "pathway graph".
    const LABEL: &'static str;
    const DEBOUNCE: Duration;

    fn endpoint(key: &str) -> Endpoint;

    /// Resolved but nothing to show.
    fn is_empty(data: &Self::Output) -> bool;
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// ============================================================================
// GENE SEARCH
// ============================================================================

pub struct GeneSearch;

impl GeneSearch {
    pub fn key(search_query: &str) -> Option<String> {
        trimmed(search_query)
    }
}

impl FetchSource for GeneSearch {
    type Output = SearchPage;

    const LABEL: &'static str = "gene search";
    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn endpoint(key: &str) -> Endpoint {
        Endpoint::Search {
            query: key.to_string(),
        }
    }

    fn is_empty(data: &SearchPage) -> bool {
        data.gene_count() == 0
    }
}

// ============================================================================
// PATHWAY LIST
// ============================================================================

pub struct PathwayList;

impl PathwayList {
    /// The selected gene wins; otherwise the raw search term is tried as a gene id.
    pub fn key(search_query: &str, selected_gene: Option<&SelectedGene>) -> Option<String> {
        selected_gene
            .and_then(SelectedGene::effective_id)
            .map(str::to_string)
            .or_else(|| trimmed(search_query))
    }
}

impl FetchSource for PathwayList {
    type Output = GeneWithPathways;

    const LABEL: &'static str = "pathway list";
    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn endpoint(key: &str) -> Endpoint {
        Endpoint::PathwaysForGene {
            gen_id: key.to_string(),
        }
    }

    fn is_empty(data: &GeneWithPathways) -> bool {
        data.pathways.is_empty()
    }
}

// ============================================================================
// PATHWAY GRAPH
// ============================================================================

pub struct PathwayGraphSource;

impl PathwayGraphSource {
    pub fn key(selected_pathway: Option<&SelectedPathway>) -> Option<String> {
        selected_pathway.and_then(|p| trimmed(&p.id))
    }
}

impl FetchSource for PathwayGraphSource {
    type Output = PathwayGraph;

    const LABEL: &'static str = "pathway graph";
    const DEBOUNCE: Duration = Duration::from_millis(100);

    fn endpoint(key: &str) -> Endpoint {
        Endpoint::PathwayGraph {
            pathway_id: key.to_string(),
        }
    }

    /// A graph with no nodes still has something to show if it carries an image.
    fn is_empty(data: &PathwayGraph) -> bool {
        data.nodes.is_empty() && data.image_url.as_deref().map_or(true, |u| u.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_key_is_trimmed() {
        assert_eq!(GeneSearch::key("  rpoB "), Some("rpoB".into()));
        assert_eq!(GeneSearch::key(" \t "), None);
    }

    #[test]
    fn test_pathway_list_key_prefers_selection() {
        let gene = SelectedGene {
            user_input: "BC_0003".into(),
            resolved_id: Some("BC_0003".into()),
            ..Default::default()
        };
        assert_eq!(
            PathwayList::key("BC_0002", Some(&gene)),
            Some("BC_0003".into())
        );
        assert_eq!(PathwayList::key(" BC_0002 ", None), Some("BC_0002".into()));
        assert_eq!(PathwayList::key("", None), None);
    }

    #[test]
    fn test_graph_key_ignores_blank_id() {
        let blank = SelectedPathway {
            id: "  ".into(),
            name: Some("Glycolysis".into()),
        };
        assert_eq!(PathwayGraphSource::key(Some(&blank)), None);
        assert_eq!(PathwayGraphSource::key(None), None);
    }
}
