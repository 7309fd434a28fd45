//! KEGG pathways for the current gene.

use std::fmt::Write as _;

use kegg_explorer_types::{GeneWithPathways, PathwayEntry};

use super::banner::{error_banner, SEARCH_CLEARED};
use super::View;
use crate::selection::{SelectedGene, SelectedPathway};

/// Store values the list text depends on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListContext<'a> {
    pub search_query: &'a str,
    pub selected_gene: Option<&'a SelectedGene>,
    pub selected_pathway: Option<&'a SelectedPathway>,
}

/// "Glycolysis (map00010)"
pub fn entry_line(entry: &PathwayEntry) -> String {
    format!("{} ({})", entry.pathway_name, entry.pathway_id)
}

/// Heading for a resolved list: the selected gene's display name when it is
/// the gene that came back, then the gene name if that differs.
pub fn title(data: &GeneWithPathways, selected_gene: Option<&SelectedGene>) -> String {
    let shown = selected_gene
        .filter(|g| g.matches(&data.gene_id))
        .and_then(|g| g.display_name.clone())
        .unwrap_or_else(|| data.gene_id.clone());

    match data.gene_name.as_deref() {
        Some(name) if name != shown => format!("{shown} ({name})"),
        _ => shown,
    }
}

/// Search term to go back to, when a selected gene is overriding it.
pub fn back_target<'a>(ctx: &ListContext<'a>) -> Option<&'a str> {
    let gene_id = ctx.selected_gene?.effective_id()?;
    let query = ctx.search_query.trim();
    (!query.is_empty() && gene_id != query).then_some(query)
}

fn no_results_for(key: &str, ctx: &ListContext<'_>) -> String {
    if let Some(gene) = ctx.selected_gene.filter(|g| g.matches(key)) {
        if let Some(name) = &gene.display_name {
            return format!("the selected gene ({name})");
        }
    }
    if ctx.search_query.trim() == key {
        return format!("\"{key}\"");
    }
    key.to_string()
}

pub fn render(view: &View<GeneWithPathways>, ctx: &ListContext<'_>) -> String {
    match view {
        View::Idle => {
            "Search for a gene or pick one from the table to see its KEGG pathways.".to_string()
        }
        View::Loading { key } => format!("Loading KEGG pathways for \"{key}\"..."),
        View::Error { key, message } => error_banner("pathways", key, message),
        View::Empty { key } => {
            format!("No KEGG pathways found for {}.", no_results_for(key, ctx))
        }
        View::Ready { data, .. } => {
            let mut out = format!(
                "KEGG pathways for: {}",
                title(data, ctx.selected_gene)
            );
            if let Some(query) = back_target(ctx) {
                let _ = write!(out, "\n  (back: show pathways for \"{query}\")");
            }
            if let Some(definition) = data.gene_definition.as_deref() {
                let _ = write!(out, "\n  {definition}");
            }
            let selected_id = ctx.selected_pathway.map(|p| p.id.as_str());
            for (i, entry) in data.pathways.iter().enumerate() {
                let marker = if selected_id == Some(entry.pathway_id.as_str()) {
                    '*'
                } else {
                    ' '
                };
                let _ = write!(out, "\n{marker}{:>3}. {}", i + 1, entry_line(entry));
            }
            out
        }
        View::Cleared => SEARCH_CLEARED.to_string(),
    }
}
