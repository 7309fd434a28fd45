//! KEGG Explorer client core
//!
//! Stores, debounced fetch units and text views for browsing UniProt search
//! results and KEGG pathways through the `kegg-explorer-web` proxy.
//!
//! ```text
//! search term ──► SearchQuery ──┬──► gene search unit ───► genes table
//!                               │                              │ pick row
//!                               │                              ▼
//!                               └──► pathway list unit ◄── SelectedGene
//!                                          │ pick pathway
//!                                          ▼
//!                                   SelectedPathway ──► pathway graph unit
//! ```

pub mod api;
pub mod explorer;
pub mod fetch;
pub mod selection;
pub mod store;
pub mod view;

pub use api::{Endpoint, HttpProxyApi, ProxyApi, RawResponse};
pub use explorer::Explorer;
pub use fetch::{FetchError, FetchPhase, FetchState, FetchUnit};
pub use selection::{ExplorerContext, SelectedGene, SelectedPathway};
pub use store::Store;
pub use view::View;
