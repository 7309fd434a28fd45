//! Pathway graph as text: nodes grouped by type, then edges.

use std::fmt::Write as _;

use kegg_explorer_types::{KeggEdge, KeggNode, PathwayGraph};

use super::banner::error_banner;
use super::View;
use crate::selection::SelectedPathway;

/// Node groups in display order; anything else lands in "other".
const NODE_KINDS: [&str; 4] = ["gene", "compound", "map", "ortholog"];

/// `pathwayName`, then the name picked in the list, then `_id`.
pub fn title(graph: &PathwayGraph, selected: Option<&SelectedPathway>) -> String {
    graph
        .pathway_name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .or_else(|| {
            selected
                .filter(|p| p.id == graph.id)
                .and_then(|p| p.name.as_deref())
        })
        .unwrap_or(&graph.id)
        .to_string()
}

/// `source -> target [label]`; label falls back to the edge type.
pub fn edge_line(edge: &KeggEdge) -> String {
    match edge.label.as_deref().or(edge.kind.as_deref()) {
        Some(label) if !label.is_empty() => {
            format!("{} -> {} [{label}]", edge.source, edge.target)
        }
        _ => format!("{} -> {}", edge.source, edge.target),
    }
}

/// Nodes bucketed by type, in display order, skipping empty groups.
pub fn group_nodes(nodes: &[KeggNode]) -> Vec<(&'static str, Vec<&KeggNode>)> {
    let mut groups: Vec<(&'static str, Vec<&KeggNode>)> = NODE_KINDS
        .iter()
        .chain(std::iter::once(&"other"))
        .map(|kind| (*kind, Vec::new()))
        .collect();

    for node in nodes {
        let slot = NODE_KINDS
            .iter()
            .position(|k| node.kind.eq_ignore_ascii_case(k))
            .unwrap_or(NODE_KINDS.len());
        groups[slot].1.push(node);
    }

    groups.retain(|(_, members)| !members.is_empty());
    groups
}

pub fn render(view: &View<PathwayGraph>, selected: Option<&SelectedPathway>) -> String {
    match view {
        View::Idle => "Select a pathway from the list to view its graph.".to_string(),
        View::Loading { key } => {
            let name = selected
                .filter(|p| p.id == *key)
                .and_then(|p| p.name.as_deref())
                .unwrap_or(key);
            format!("Loading graph for {name}...")
        }
        View::Error { key, message } => error_banner("pathway graph", key, message),
        View::Empty { key } => format!("No graph data for pathway \"{key}\"."),
        View::Ready { data, .. } => render_graph(data, selected),
        View::Cleared => "Pathway selection cleared.".to_string(),
    }
}

fn render_graph(graph: &PathwayGraph, selected: Option<&SelectedPathway>) -> String {
    let mut out = format!("Pathway: {} ({})", title(graph, selected), graph.id);
    if let Some(organism) = graph.organism_code.as_deref() {
        let _ = write!(out, "\n  organism: {organism}");
    }

    if graph.nodes.is_empty() {
        if let Some(url) = graph.image_url.as_deref() {
            let _ = write!(out, "\n  image: {url}");
        }
        return out;
    }

    let _ = write!(out, "\nNodes ({}):", graph.nodes.len());
    for (kind, members) in group_nodes(&graph.nodes) {
        let labels: Vec<&str> = members.iter().map(|n| n.label.as_str()).collect();
        let _ = write!(out, "\n  {kind} ({}): {}", members.len(), labels.join(", "));
    }

    let _ = write!(out, "\nEdges ({}):", graph.edges.len());
    for edge in &graph.edges {
        let _ = write!(out, "\n  {}", edge_line(edge));
    }
    out
}
