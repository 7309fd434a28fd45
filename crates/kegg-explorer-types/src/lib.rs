//! Shared API Types for KEGG Explorer
//!
//! This crate is the SINGLE SOURCE OF TRUTH for all types crossing HTTP boundaries.
//!
//! ## Boundaries
//!
//! ```text
//! ┌──────────────┐  JSON  ┌──────────────────┐  JSON  ┌──────────────────┐
//! │  Upstream    │ ─────► │  Proxy (Axum)    │ ─────► │  Explorer client │
//! │  services    │        │  kegg-explorer-  │        │  kegg-explorer   │
//! └──────────────┘        │  web             │        └──────────────────┘
//!                         └──────────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. All API types live here - no inline struct definitions in handlers
//! 2. Field names follow the wire, not Rust style (`serde(rename)` where they differ)
//! 3. Decoding is the first half of validation; `check_shape` is the second

pub mod kegg;
pub mod uniprot;

use serde::{Deserialize, Serialize};

pub use kegg::*;
pub use uniprot::*;

// ============================================================================
// ERROR ENVELOPE
// ============================================================================

/// Error body returned by every proxy route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
        }
    }

    pub fn with_detail(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: Some(detail.into()),
        }
    }
}

/// Pull the most human-readable message out of an error body.
///
/// Looks for `detail`, then `error`, then `message`. A non-string `detail`
/// (FastAPI validation errors are arrays) is rendered as compact JSON.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    for field in ["detail", "error", "message"] {
        match object.get(field) {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
                return Some(s.clone());
            }
            Some(serde_json::Value::Null) | None => continue,
            Some(serde_json::Value::String(_)) => continue,
            Some(other) => return Some(other.to_string()),
        }
    }
    None
}

// ============================================================================
// SHAPE VALIDATION
// ============================================================================

/// A decoded payload that is structurally valid JSON but violates the contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("required field `{0}` is missing or blank")]
    BlankField(&'static str),

    #[error("{field} entry {index} has a blank `{inner}`")]
    BlankEntryField {
        field: &'static str,
        index: usize,
        inner: &'static str,
    },
}

/// Post-decode contract check.
///
/// `serde` already guarantees that list fields are arrays and required fields
/// exist; this covers what the type system cannot (blank identifiers).
pub trait CheckShape {
    fn check_shape(&self) -> Result<(), ShapeError>;
}

pub(crate) fn require_non_blank(value: &str, field: &'static str) -> Result<(), ShapeError> {
    if value.trim().is_empty() {
        Err(ShapeError::BlankField(field))
    } else {
        Ok(())
    }
}
