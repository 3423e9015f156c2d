//! Minimal OpenID Connect discovery document.
//!
//! Just enough for relying parties that take a provider URI instead of a
//! JWKS URI to find the key set.

use crate::keys::SigningAlgorithm;
use serde::{Deserialize, Serialize};
use std::env;

/// Path of the key set, relative to the issuer.
pub const JWKS_PATH: &str = "/.well-known/jwks.json";

/// Served at `/.well-known/openid-configuration`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OidcConfiguration {
    /// Absolute URL of the key set
    pub jwks_uri: String,
    /// Issuer identifier
    pub issuer: String,
    /// Every algorithm this service can sign with
    pub id_token_signing_alg_values_supported: Vec<String>,
    /// Always `id_token`
    pub response_types_supported: Vec<String>,
    /// Always `public`
    pub subject_types_supported: Vec<String>,
}

impl OidcConfiguration {
    /// Discovery document for `issuer`, used verbatim as the URL prefix.
    pub fn new(issuer: &str) -> Self {
        OidcConfiguration {
            jwks_uri: format!("{issuer}{JWKS_PATH}"),
            issuer: issuer.to_string(),
            id_token_signing_alg_values_supported: SigningAlgorithm::SUPPORTED
                .iter()
                .map(|alg| alg.as_str().to_string())
                .collect(),
            response_types_supported: vec!["id_token".to_string()],
            subject_types_supported: vec!["public".to_string()],
        }
    }

    /// Discovery document for the raw `ISSUER` variable (empty when unset).
    pub fn from_env() -> Self {
        Self::new(&env::var("ISSUER").unwrap_or_default())
    }
}
