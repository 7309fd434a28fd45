//! Genes table: one row per gene across all search hits, paginated locally.

use std::fmt::Write as _;

use kegg_explorer_types::SearchPage;

use super::banner::{error_banner, truncate, SEARCH_CLEARED};
use super::View;
use crate::selection::SelectedGene;

pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

const DESCRIPTION_WIDTH: usize = 40;
const SEQUENCE_WIDTH: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRow {
    pub accession: String,
    /// Ordered locus name, e.g. "BC_0002".
    pub gene_name: String,
    pub description: String,
    pub sequence: String,
    pub length: u64,
    pub mol_weight: Option<u64>,
}

impl GeneRow {
    /// Selection written when this row is picked.
    pub fn selection(&self) -> SelectedGene {
        let locus = self.gene_name.clone();
        SelectedGene {
            user_input: locus.clone(),
            uniprot_id: Some(self.accession.clone()).filter(|a| a != "N/A"),
            resolved_id: Some(locus.clone()).filter(|l| !l.trim().is_empty()),
            display_name: Some(locus).filter(|l| !l.trim().is_empty()),
        }
    }
}

/// Flatten search hits into table rows; an entry with N genes gives N rows.
pub fn rows(page: &SearchPage) -> Vec<GeneRow> {
    page.result
        .iter()
        .flat_map(|item| {
            let sequence = item.sequence.clone().unwrap_or_default();
            item.genes.iter().map(move |gene| GeneRow {
                accession: item
                    .primary_accession
                    .clone()
                    .unwrap_or_else(|| "N/A".to_string()),
                gene_name: gene.ordered_locus_names.clone().unwrap_or_default(),
                description: item.protein_description.clone().unwrap_or_default(),
                sequence: sequence.value.clone().unwrap_or_default(),
                length: sequence.length.unwrap_or(0),
                mol_weight: sequence.mol_weight,
            })
        })
        .collect()
}

pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_rows.div_ceil(page_size)
}

/// Render one page of rows. `page` is zero-based and clamped to the last page.
pub fn render_table(rows: &[GeneRow], page: usize, page_size: usize) -> String {
    let page_size = page_size.max(1);
    let pages = page_count(rows.len(), page_size).max(1);
    let page = page.min(pages - 1);
    let start = page * page_size;
    let end = (start + page_size).min(rows.len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<10}  {:<12}  {:<desc$}  {:<seq$}  {:>6}  {:>10}",
        "#",
        "Accession",
        "Gene Name",
        "Protein Description",
        "Sequence",
        "Length",
        "Mol. Weight",
        desc = DESCRIPTION_WIDTH,
        seq = SEQUENCE_WIDTH,
    );
    for (offset, row) in rows[start..end].iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<10}  {:<12}  {:<desc$}  {:<seq$}  {:>6}  {:>10}",
            start + offset + 1,
            row.accession,
            row.gene_name,
            truncate(&row.description, DESCRIPTION_WIDTH),
            truncate(&row.sequence, SEQUENCE_WIDTH),
            row.length,
            row.mol_weight.map(|w| w.to_string()).unwrap_or_default(),
            desc = DESCRIPTION_WIDTH,
            seq = SEQUENCE_WIDTH,
        );
    }
    let _ = write!(
        out,
        "Rows {}-{} of {} (page {}/{}, {} per page)",
        if rows.is_empty() { 0 } else { start + 1 },
        end,
        rows.len(),
        page + 1,
        pages,
        page_size
    );
    out
}

pub fn render(view: &View<SearchPage>, page: usize, page_size: usize) -> String {
    match view {
        View::Idle => "Enter a gene or protein term to search UniProt.".to_string(),
        View::Loading { key } => format!("Searching UniProt for \"{key}\"..."),
        View::Error { key, message } => error_banner("genes", key, message),
        View::Empty { key } => format!("No genes found for \"{key}\"."),
        View::Ready { key, data } => {
            let rows = rows(data);
            let mut out = format!("Genes matching \"{key}\"");
            if let Some(total) = data.total {
                let _ = write!(out, " ({total} entries upstream)");
            }
            out.push('\n');
            out.push_str(&render_table(&rows, page, page_size));
            out
        }
        View::Cleared => SEARCH_CLEARED.to_string(),
    }
}
