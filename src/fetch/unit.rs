//! Debounced fetch unit
//!
//! ```text
//!          key set            timer fires           response
//!  Idle ───────────► Debouncing ─────────► Loading ─────────► Success | Error
//!   ▲                  │  ▲ key changed                             │
//!   │   key cleared    │  └─────────────────────────────────────────┘
//!   └──────────────────┘   (from any state)
//! ```
//!
//! A key change aborts the pending timer. A request already in flight is left
//! to finish; its result is committed only if the unit's generation has not
//! moved on since the request was issued.
//!
//! Dropping the last handle to a unit aborts its pending timer. A request
//! already in flight still completes, but its result is thrown away.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use kegg_explorer_types::{error_message_from_body, CheckShape};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::error::FetchError;
use super::source::FetchSource;
use super::state::FetchState;
use crate::api::ProxyApi;
use crate::view::View;

struct Inner<S: FetchSource> {
    api: Arc<dyn ProxyApi>,
    state: watch::Sender<FetchState<S::Output>>,
    debounce: Mutex<Option<JoinHandle<()>>>,
    _source: PhantomData<fn() -> S>,
}

impl<S: FetchSource> Drop for Inner<S> {
    fn drop(&mut self) {
        let debounce = self
            .debounce
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = debounce.take() {
            handle.abort();
        }
    }
}

/// Fetch state for one data kind, driven by [`on_key`](Self::on_key).
pub struct FetchUnit<S: FetchSource> {
    inner: Arc<Inner<S>>,
}

impl<S: FetchSource> Clone for FetchUnit<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: FetchSource> FetchUnit<S> {
    pub fn new(api: Arc<dyn ProxyApi>) -> Self {
        let (state, _rx) = watch::channel(FetchState::default());
        Self {
            inner: Arc::new(Inner {
                api,
                state,
                debounce: Mutex::new(None),
                _source: PhantomData,
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState<S::Output> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<S::Output>> {
        self.inner.state.subscribe()
    }

    pub fn view(&self) -> View<S::Output> {
        View::of::<S>(&self.inner.state.borrow())
    }

    /// Feed the unit its current key. Must be called from within a tokio runtime.
    ///
    /// Blank keys reset the unit. Repeating the active key is a no-op,
    /// whether that key is still debouncing, in flight or already settled.
    pub fn on_key(&self, key: Option<&str>) {
        let key = key.map(str::trim).filter(|k| !k.is_empty());
        let mut debounce = self
            .inner
            .debounce
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(key) = key else {
            if let Some(handle) = debounce.take() {
                handle.abort();
            }
            self.inner.state.send_if_modified(|s| {
                let untouched = s.key.is_none()
                    && s.data.is_none()
                    && s.error.is_none()
                    && s.last_requested_key.is_none()
                    && s.is_settled();
                if untouched {
                    return false;
                }
                s.generation += 1;
                s.key = None;
                s.data = None;
                s.error = None;
                s.pending = false;
                s.loading = false;
                s.last_requested_key = None;
                true
            });
            return;
        };

        if self.inner.state.borrow().key.as_deref() == Some(key) {
            tracing::debug!("{} for {:?} already requested, skipping", S::LABEL, key);
            return;
        }

        if let Some(handle) = debounce.take() {
            handle.abort();
        }

        let key = key.to_string();
        let mut generation = 0;
        self.inner.state.send_modify(|s| {
            s.generation += 1;
            generation = s.generation;
            if s.last_requested_key.as_deref() != Some(key.as_str()) {
                s.data = None;
                s.error = None;
            }
            s.key = Some(key.clone());
            s.pending = true;
            s.loading = false;
        });

        let unit = Arc::downgrade(&self.inner);
        *debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(S::DEBOUNCE).await;

            let Some(inner) = unit.upgrade() else {
                return;
            };
            let fired = inner.state.send_if_modified(|s| {
                if s.generation != generation {
                    return false;
                }
                s.pending = false;
                s.loading = true;
                s.error = None;
                s.has_fetched = true;
                true
            });
            if !fired {
                return;
            }

            // Runs outside the timer task so a later abort cannot cancel it.
            let api = Arc::clone(&inner.api);
            drop(inner);
            tokio::spawn(Self::run(api, unit, key, generation));
        }));
    }

    /// Wait until no timer is pending and no request is in flight.
    pub async fn settled(&self) -> FetchState<S::Output> {
        let mut rx = self.inner.state.subscribe();
        let settled = match rx.wait_for(|s| s.is_settled()).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| self.state())
    }

    async fn run(api: Arc<dyn ProxyApi>, unit: Weak<Inner<S>>, key: String, generation: u64) {
        tracing::info!("Fetching {} for {:?}", S::LABEL, key);
        let result = fetch::<S>(api.as_ref(), &key).await;

        let Some(inner) = unit.upgrade() else {
            tracing::debug!("{} unit dropped, discarding response for {:?}", S::LABEL, key);
            return;
        };
        inner.state.send_if_modified(|s| {
            if s.generation != generation {
                tracing::debug!("Discarding stale {} response for {:?}", S::LABEL, key);
                return false;
            }
            s.loading = false;
            match result {
                Ok(data) => {
                    s.data = Some(Arc::new(data));
                    s.error = None;
                }
                Err(e) => {
                    tracing::warn!("{} for {:?} failed: {}", S::LABEL, key, e);
                    s.data = None;
                    s.error = Some(e.to_string());
                }
            }
            s.last_requested_key = Some(key);
            true
        });
    }
}

/// One request for `key`, decoded and validated.
pub async fn fetch<S: FetchSource>(api: &dyn ProxyApi, key: &str) -> Result<S::Output, FetchError> {
    let response = api.get_raw(&S::endpoint(key)).await?;

    if !response.is_success() {
        return Err(FetchError::Status {
            status: response.status,
            message: status_message(response.status, &response.body),
        });
    }

    decode(key, &response.body)
}

fn status_message(status: u16, body: &str) -> String {
    error_message_from_body(body).unwrap_or_else(|| {
        StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Request failed")
            .to_string()
    })
}

fn decode<T: DeserializeOwned + CheckShape>(key: &str, body: &str) -> Result<T, FetchError> {
    let contract = |detail: String| FetchError::Contract {
        key: key.to_string(),
        detail,
    };
    let value: T = serde_json::from_str(body).map_err(|e| contract(e.to_string()))?;
    value.check_shape().map_err(|e| contract(e.to_string()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kegg_explorer_types::{GeneWithPathways, PathwayGraph};

    #[test]
    fn test_status_message_prefers_body_detail() {
        let msg = status_message(404, r#"{"error":"Failed to fetch data from KEGG service","detail":"not found"}"#);
        assert_eq!(msg, "not found");
    }

    #[test]
    fn test_status_message_falls_back_to_reason() {
        assert_eq!(status_message(503, "<html>down</html>"), "Service Unavailable");
        assert_eq!(status_message(599, ""), "Request failed");
    }

    #[test]
    fn test_decode_names_key_on_missing_array() {
        let err = decode::<GeneWithPathways>("BC_0002", r#"{"geneId":"bce:BC_0002"}"#).unwrap_err();
        match &err {
            FetchError::Contract { key, .. } => assert_eq!(key, "BC_0002"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(err.to_string().contains("\"BC_0002\""));
    }

    #[test]
    fn test_decode_runs_shape_check() {
        let err = decode::<PathwayGraph>("map00010", r#"{"_id":"","nodes":[],"edges":[]}"#)
            .unwrap_err();
        assert!(matches!(err, FetchError::Contract { .. }));
    }
}
