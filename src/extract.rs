use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ApiError;

/// Decodes a JSON request body regardless of its declared content type.
pub fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "malformed json body");
        ApiError::BadRequest
    })
}
