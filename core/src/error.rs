//! Error types for the storefront API client.
//!
//! # Design
//! The taxonomy is flat: every pipeline stage converts its own failure into
//! exactly one `ApiError` variant before returning. String payloads carry a
//! diagnostic for logs and display; callers branch on the variant only.

use thiserror::Error;

/// Fallback reason used when a rejecting envelope carries no `redirect`.
pub const DEFAULT_REJECTION_MESSAGE: &str = "An error occurred.";

/// Errors returned by `ApiClient` and the aggregation layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Base URL and endpoint path do not form a valid URL. No request was sent.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be serialized to JSON. No request was sent.
    #[error("request encoding failed: {0}")]
    RequestEncodingFailed(String),

    /// Non-2xx HTTP status or a transport-level failure.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The envelope or its payload could not be decoded.
    #[error("decoding failed: {0}")]
    DecodingFailed(String),

    /// The envelope has no `code`.
    #[error("missing status code")]
    MissingStatusCode,

    /// The envelope reports success but carries no `data`.
    #[error("missing payload")]
    MissingPayload,

    /// The envelope's own status code signals failure.
    #[error("server rejected request: {0}")]
    ServerRejected(String),
}

impl ApiError {
    /// Stable variant name, used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidUrl(_) => "InvalidUrl",
            ApiError::RequestEncodingFailed(_) => "RequestEncodingFailed",
            ApiError::RequestFailed(_) => "RequestFailed",
            ApiError::DecodingFailed(_) => "DecodingFailed",
            ApiError::MissingStatusCode => "MissingStatusCode",
            ApiError::MissingPayload => "MissingPayload",
            ApiError::ServerRejected(_) => "ServerRejected",
        }
    }
}
