//! Text views over fetch unit state.
//!
//! Every unit renders through [`View`], which fixes the precedence:
//! idle prompt, loading, error, empty, data, cleared.

pub mod banner;
pub mod genes_table;
pub mod pathway_graph;
pub mod pathway_list;

use std::sync::Arc;

use crate::fetch::{FetchSource, FetchState};

/// What a unit should display right now.
#[derive(Debug)]
pub enum View<T> {
    /// No key and nothing fetched yet.
    Idle,
    /// Debouncing or in flight.
    Loading { key: String },
    Error { key: String, message: String },
    Empty { key: String },
    Ready { key: String, data: Arc<T> },
    /// Key was cleared after an earlier fetch.
    Cleared,
}

impl<T> View<T> {
    pub fn of<S>(state: &FetchState<T>) -> Self
    where
        S: FetchSource<Output = T>,
    {
        let Some(key) = state.key.clone() else {
            return if state.has_fetched {
                View::Cleared
            } else {
                View::Idle
            };
        };

        if state.pending || state.loading {
            return View::Loading { key };
        }
        if let Some(message) = &state.error {
            return View::Error {
                key: state.last_requested_key.clone().unwrap_or(key),
                message: message.clone(),
            };
        }
        match &state.data {
            Some(data) if S::is_empty(data) => View::Empty { key },
            Some(data) => View::Ready {
                key,
                data: Arc::clone(data),
            },
            None => View::Loading { key },
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            View::Loading { key }
            | View::Error { key, .. }
            | View::Empty { key }
            | View::Ready { key, .. } => Some(key),
            View::Idle | View::Cleared => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, View::Error { .. })
    }
}
