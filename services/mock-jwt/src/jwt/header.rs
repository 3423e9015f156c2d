//! JOSE header of signed tokens.

use crate::keys::SigningAlgorithm;
use serde::{Deserialize, Serialize};

/// JOSE header written on every token this service signs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JwsHeader {
    /// Signing algorithm
    pub alg: String,
    /// Key name of the signing key
    pub kid: String,
    /// Always `JWT`
    pub typ: String,
}

impl JwsHeader {
    /// Header for a token signed by `key_id` under `algorithm`.
    #[must_use]
    pub fn new(algorithm: SigningAlgorithm, key_id: impl Into<String>) -> Self {
        JwsHeader {
            alg: algorithm.as_str().to_string(),
            kid: key_id.into(),
            typ: "JWT".to_string(),
        }
    }
}
