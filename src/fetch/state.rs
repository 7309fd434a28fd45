use std::sync::Arc;

/// Observable state of one fetch unit.
#[derive(Debug)]
pub struct FetchState<T> {
    /// Active key (trimmed, non-empty) or `None` when there is nothing to fetch.
    pub key: Option<String>,
    pub data: Option<Arc<T>>,
    /// Debounce timer running for `key`.
    pub pending: bool,
    /// Request in flight for `key`.
    pub loading: bool,
    pub error: Option<String>,
    /// Key of the last committed response.
    pub last_requested_key: Option<String>,
    /// A request has been issued at least once since the unit started.
    pub has_fetched: bool,
    /// Bumped on every key change; responses from older generations are dropped.
    pub generation: u64,
}

/// Coarse lifecycle position of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Debouncing,
    Loading,
    Success,
    Error,
}

impl<T> FetchState<T> {
    pub fn phase(&self) -> FetchPhase {
        if self.key.is_none() {
            FetchPhase::Idle
        } else if self.pending {
            FetchPhase::Debouncing
        } else if self.loading {
            FetchPhase::Loading
        } else if self.error.is_some() {
            FetchPhase::Error
        } else if self.data.is_some() {
            FetchPhase::Success
        } else {
            FetchPhase::Idle
        }
    }

    /// No timer running and nothing in flight.
    pub fn is_settled(&self) -> bool {
        !self.pending && !self.loading
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            key: None,
            data: None,
            pending: false,
            loading: false,
            error: None,
            last_requested_key: None,
            has_fetched: false,
            generation: 0,
        }
    }
}

impl<T> Clone for FetchState<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            data: self.data.clone(),
            pending: self.pending,
            loading: self.loading,
            error: self.error.clone(),
            last_requested_key: self.last_requested_key.clone(),
            has_fetched: self.has_fetched,
            generation: self.generation,
        }
    }
}
