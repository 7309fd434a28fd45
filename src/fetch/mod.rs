//! Fetch-and-display units: one debounced loader per data kind.
//!
//! | Unit          | Key                                  | Route                           | Debounce |
//! |---------------|--------------------------------------|---------------------------------|----------|
//! | gene search   | trimmed search term                  | `/api/search`                   | 300 ms   |
//! | pathway list  | selected gene id, else search term   | `/api/kegg/pathways_for_gene/…` | 300 ms   |
//! | pathway graph | selected pathway id                  | `/api/kegg/pathway_graph/…`     | 100 ms   |

mod error;
pub mod source;
mod state;
mod unit;

pub use error::FetchError;
pub use source::{FetchSource, GeneSearch, PathwayGraphSource, PathwayList};
pub use state::{FetchPhase, FetchState};
pub use unit::{fetch, FetchUnit};
