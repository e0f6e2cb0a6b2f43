//! The uniform response wrapper every server operation returns.
//!
//! ```json
//! { "code": 200, "redirect": null, "data": <payload>, "token": null }
//! ```
//!
//! `data` is held as raw JSON until the success branch is chosen, so a
//! rejecting envelope with a payload of some other shape still yields
//! `ServerRejected` instead of a decoding error.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::error::Category;
use serde_json::Value;

use crate::error::{ApiError, DEFAULT_REJECTION_MESSAGE};

/// Envelope status code signalling success.
pub const SUCCESS_CODE: i64 = 200;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T = Value> {
    pub code: Option<i64>,
    pub redirect: Option<String>,
    pub data: Option<T>,
    pub token: Option<String>,
}

impl Envelope {
    /// Parse the outer envelope only, leaving `data` undecoded.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ApiError> {
        serde_json::from_slice(bytes).map_err(|e| decoding_failed("envelope", &e))
    }

    /// Classify the envelope and decode `data` as `T` on success.
    pub fn into_payload<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let Some(code) = self.code else {
            return Err(ApiError::MissingStatusCode);
        };
        if code != SUCCESS_CODE {
            let message = self
                .redirect
                .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string());
            tracing::debug!(code, %message, "server rejected request");
            return Err(ApiError::ServerRejected(message));
        }
        // `"data": null` deserializes to `None` as well.
        let data = self.data.ok_or(ApiError::MissingPayload)?;
        serde_json::from_value(data).map_err(|e| decoding_failed("payload", &e))
    }
}

/// Decode a raw response body into the payload type `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    Envelope::from_slice(bytes)?.into_payload()
}

/// Log the structural reason of a serde failure and classify it.
pub(crate) fn decoding_failed(stage: &'static str, err: &serde_json::Error) -> ApiError {
    let category = match err.classify() {
        Category::Io => "io",
        Category::Syntax => "corrupted data",
        Category::Data => "type mismatch or missing key",
        Category::Eof => "unexpected end of input",
    };
    tracing::warn!(
        stage,
        category,
        line = err.line(),
        column = err.column(),
        error = %err,
        "response decoding failed"
    );
    ApiError::DecodingFailed(err.to_string())
}
