//! Compact JWS serialization: `base64url(header).base64url(payload).base64url(signature)`.

use crate::error::MockJwtError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialize `value` as JSON and base64url-encode it without padding.
///
/// # Errors
///
/// Returns [`MockJwtError::SigningFailed`] if `value` cannot be serialized.
pub fn encode_segment<T: Serialize>(value: &T) -> Result<String, MockJwtError> {
    let json = serde_json::to_vec(value)
        .map_err(|e| MockJwtError::signing(format!("serialization failed: {e}")))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode one base64url segment and parse it as JSON.
///
/// Trailing `=` padding is tolerated.
///
/// # Errors
///
/// Returns [`MockJwtError::MalformedToken`] naming `what` on bad base64 or JSON.
pub fn decode_segment<T: DeserializeOwned>(segment: &str, what: &str) -> Result<T, MockJwtError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| MockJwtError::malformed(format!("{what} is not valid base64url: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| MockJwtError::malformed(format!("{what} is not a JSON object: {e}")))
}

/// `header.payload`, the bytes a JWS signature covers.
///
/// # Errors
///
/// Returns [`MockJwtError::SigningFailed`] if either part fails to serialize.
pub fn signing_input<H: Serialize, C: Serialize>(header: &H, claims: &C) -> Result<String, MockJwtError> {
    Ok(format!("{}.{}", encode_segment(header)?, encode_segment(claims)?))
}
