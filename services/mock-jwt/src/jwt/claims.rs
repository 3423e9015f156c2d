//! Token payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Claim names this service fills in on issuance
/// Subject
pub const SUBJECT: &str = "sub";
/// Display name
pub const NAME: &str = "name";
/// Email address
pub const EMAIL: &str = "email";
/// Issuer
pub const ISSUER: &str = "iss";
/// Audience
pub const AUDIENCE: &str = "aud";
/// Issued-at, Unix seconds
pub const ISSUED_AT: &str = "iat";
/// Expiry, Unix seconds
pub const EXPIRES_AT: &str = "exp";

/// A token payload: an open JSON object, insertion order preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    /// Empty claim set.
    #[must_use]
    pub fn new() -> Self {
        ClaimSet(Map::new())
    }

    /// Set a claim, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// String value of a claim, if present and a string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// `iat` as Unix seconds.
    #[must_use]
    pub fn issued_at(&self) -> Option<i64> {
        self.0.get(ISSUED_AT).and_then(Value::as_i64)
    }

    /// `exp` as Unix seconds.
    #[must_use]
    pub fn expires_at(&self) -> Option<i64> {
        self.0.get(EXPIRES_AT).and_then(Value::as_i64)
    }

    /// Number of claims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no claims.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ClaimSet {
    fn from(map: Map<String, Value>) -> Self {
        ClaimSet(map)
    }
}
