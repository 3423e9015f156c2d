//! Reading a token WITHOUT checking its signature or any claim.
//!
//! The re-signing flow takes drafts that are unsigned or signed by someone
//! else, so nothing here may be reused where a signature must be trusted.

use crate::error::MockJwtError;
use crate::jwt::claims::ClaimSet;
use crate::jwt::serializer::decode_segment;
use serde_json::{Map, Value};

/// Header and payload of a token whose signature was ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct UnverifiedToken {
    /// Draft header, kept only for logging
    pub header: Map<String, Value>,
    /// Draft payload
    pub claims: ClaimSet,
}

/// Split a compact token into header and claims.
///
/// Accepts two segments (`header.payload`) or three, in which case the
/// signature segment is ignored. Expired or not-yet-valid tokens parse fine.
///
/// # Errors
///
/// Returns [`MockJwtError::MalformedToken`] on a wrong segment count or a
/// segment that is not base64url-encoded JSON object.
pub fn parse_claims_unverified(raw: &str) -> Result<UnverifiedToken, MockJwtError> {
    let segments: Vec<&str> = raw.trim().split('.').collect();
    if !(2..=3).contains(&segments.len()) {
        return Err(MockJwtError::malformed(format!(
            "token contains an invalid number of segments: {}",
            segments.len()
        )));
    }

    let header = decode_segment(segments[0], "header")?;
    let claims: Map<String, Value> = decode_segment(segments[1], "payload")?;

    Ok(UnverifiedToken {
        header,
        claims: ClaimSet::from(claims),
    })
}
