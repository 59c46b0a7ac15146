//! Decoding of response bodies, kept apart from the transport so it can be
//! tested without a server.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::model::ValidationErrorDetail;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    details: Option<Vec<ValidationErrorDetail>>,
}

/// Builds the error for a non-success response.
///
/// Bodies shaped like `{"error":{"details":[...]}}` contribute their details;
/// anything else produces a rejection without details.
pub fn decode_error(status: u16, body: &[u8]) -> ApiError {
    let details = serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.details)
        .unwrap_or_default();
    ApiError::Rejected { status, details }
}

/// Decodes a success body, treating an empty (or whitespace) body as `T::default()`.
pub fn decode_success<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}
