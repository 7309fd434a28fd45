//! Proxy error taxonomy and its HTTP mapping.
//!
//! | Variant             | Status            | Meaning                                  |
//! |---------------------|-------------------|------------------------------------------|
//! | `MissingParameter`  | 400               | blank/missing identifier or query        |
//! | `InvalidParameter`  | 400               | unparseable optional parameter           |
//! | `Upstream`          | upstream's status | upstream answered non-2xx                |
//! | `MalformedUpstream` | 502               | 2xx but the body broke the contract      |
//! | `Transport`         | 500               | upstream unreachable / connection failed |

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kegg_explorer_types::ErrorEnvelope;

/// Which upstream a failure came from; only affects the error label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Uniprot,
    Kegg,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Uniprot => f.write_str("UniProt"),
            Service::Kegg => f.write_str("KEGG"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("{0}")]
    MissingParameter(&'static str),

    #[error("Invalid query parameters")]
    InvalidParameter(String),

    #[error("Failed to fetch data from {service} service")]
    Upstream {
        service: Service,
        status: u16,
        detail: String,
    },

    #[error("Failed to parse data from {service} service")]
    MalformedUpstream { service: Service, detail: String },

    #[error("Internal Server Error")]
    Transport { detail: String },
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingParameter(_) | ProxyError::InvalidParameter(_) => {
                StatusCode::BAD_REQUEST
            }
            ProxyError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::MalformedUpstream { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::Transport { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            ProxyError::MissingParameter(_) => ErrorEnvelope::new(self.to_string()),
            ProxyError::InvalidParameter(detail)
            | ProxyError::Upstream { detail, .. }
            | ProxyError::MalformedUpstream { detail, .. }
            | ProxyError::Transport { detail } => {
                ErrorEnvelope::with_detail(self.to_string(), detail.clone())
            }
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Transport {
            detail: error_chain(&err),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope())).into_response()
    }
}

/// Render an error with its `source()` chain, e.g. "error sending request: connection refused".
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
