//! KEGG Explorer proxy server.
//!
//! Thin HTTP layer between the explorer client and two upstream services:
//! the UniProt-backed protein search and the KEGG gene/pathway service.
//! Every route forwards one identifier, maps the upstream JSON into the
//! shared `kegg-explorer-types` shapes and reports failures as an
//! `ErrorEnvelope`.
//!
//! ## Endpoints
//!
//! - `GET /api/search?query=...` - protein/gene search (paginated)
//! - `GET /api/kegg/pathways_for_gene/:gen_id` - pathways a gene participates in
//! - `GET /api/kegg/pathway_graph/:pathway_id` - nodes/edges of one pathway map
//! - `GET /api/health` - liveness plus the configured upstream

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod upstream;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use router::build_router;
pub use state::AppState;
pub use upstream::UpstreamClient;
