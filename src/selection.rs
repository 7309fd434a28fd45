//! Query and selection state shared by the explorer views.
//!
//! There is no global or default instance: every consumer receives an
//! [`ExplorerContext`] through its constructor.

use crate::store::Store;

/// A gene picked from the genes table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedGene {
    /// What the user picked or typed, e.g. the ordered locus name.
    pub user_input: String,
    pub uniprot_id: Option<String>,
    /// KEGG gene id to query; preferred over `user_input` when present.
    pub resolved_id: Option<String>,
    pub display_name: Option<String>,
}

impl SelectedGene {
    /// Identifier the pathway list should be fetched for.
    pub fn effective_id(&self) -> Option<&str> {
        self.resolved_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .or_else(|| Some(self.user_input.trim()).filter(|id| !id.is_empty()))
    }

    /// True if `id` is this gene under any of its names.
    pub fn matches(&self, id: &str) -> bool {
        self.resolved_id.as_deref() == Some(id) || self.user_input == id
    }
}

/// A pathway picked from the pathway list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPathway {
    pub id: String,
    pub name: Option<String>,
}

/// The three stores, handed to every unit and view that reads them.
#[derive(Debug, Clone)]
pub struct ExplorerContext {
    pub search_query: Store<String>,
    pub selected_gene: Store<Option<SelectedGene>>,
    pub selected_pathway: Store<Option<SelectedPathway>>,
}

#[allow(clippy::new_without_default)]
impl ExplorerContext {
    pub fn new() -> Self {
        Self {
            search_query: Store::new(String::new()),
            selected_gene: Store::new(None),
            selected_pathway: Store::new(None),
        }
    }

    /// Replace the search term. This is the only search trigger.
    pub fn submit_search(&self, term: impl Into<String>) {
        let term = term.into();
        tracing::debug!("Search term set to {:?}", term);
        self.search_query.set(term);
    }

    pub fn select_gene(&self, gene: SelectedGene) {
        self.selected_gene.set(Some(gene));
    }

    /// Drops the gene and its display name together.
    pub fn clear_gene(&self) {
        self.selected_gene.set(None);
    }

    pub fn select_pathway(&self, id: impl Into<String>, name: Option<String>) {
        self.selected_pathway.set(Some(SelectedPathway {
            id: id.into(),
            name,
        }));
    }

    pub fn clear_pathway(&self) {
        self.selected_pathway.set(None);
    }
}
