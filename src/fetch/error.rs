use thiserror::Error;

/// Why a fetch unit ended in its error state.
///
/// The `Display` text is what the error banner shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx from the proxy; `message` comes from the error body when present.
    #[error("Error {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx whose body did not decode or validate.
    #[error("Invalid response for \"{key}\": {detail}")]
    Contract { key: String, detail: String },
}
