//! Route handlers, one module per proxied upstream endpoint.

pub mod gene_pathways;
pub mod health;
pub mod pathway_graph;
pub mod search;

/// Trim an identifier taken from the request; `None` if nothing is left.
pub(crate) fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank_trims_and_rejects_whitespace() {
        assert_eq!(non_blank(Some("  BC_0002 ")), Some("BC_0002"));
        assert_eq!(non_blank(Some(" \t ")), None);
        assert_eq!(non_blank(None), None);
    }
}
