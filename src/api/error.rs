//! Error taxonomy for upstream fetches.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: DNS, connect, TLS, or a dropped body.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The resource does not exist upstream.
    #[error("{resource} not found upstream")]
    NotFound { resource: String },

    /// Non-success status that is not a plain 404.
    #[error("unexpected status {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    /// The payload arrived but did not decode into the expected shape.
    #[error("malformed response from {endpoint}: {detail}")]
    Malformed { endpoint: String, detail: String },

    /// Both catalog paths failed; nothing can be listed.
    #[error("catalog unavailable (batched query: {primary}; listing fallback: {fallback})")]
    RemoteUnavailable { primary: String, fallback: String },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    pub(crate) fn malformed(endpoint: &str, detail: impl Into<String>) -> Self {
        ApiError::Malformed {
            endpoint: endpoint.to_string(),
            detail: detail.into(),
        }
    }
}
