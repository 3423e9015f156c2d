//! Issuing brand-new tokens from the issuance configuration.

use crate::config::TokenConfig;
use crate::error::MockJwtError;
use crate::jwt::builder::ClaimsBuilder;
use crate::jwt::signer::TokenSigner;
use crate::keys::{KeyStore, SigningAlgorithm};
use crate::metrics;
use std::sync::Arc;
use tracing::{info, warn};

/// Issues tokens signed with keys from a shared [`KeyStore`].
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    store: Arc<KeyStore>,
}

impl TokenIssuer {
    /// Issuer backed by `store`.
    #[must_use]
    pub fn new(store: Arc<KeyStore>) -> Self {
        TokenIssuer { store }
    }

    /// Issue a token for `key_name`, creating the key for `alg` if needed.
    ///
    /// The claim set is `sub`, `name`, `email`, `iss`, `aud`, `iat` and
    /// `exp = iat + 24h`, overlaid with the configured extra claims.
    ///
    /// # Errors
    ///
    /// `UnsupportedAlgorithm` and `KeyGenerationFailed` from key resolution,
    /// `SigningFailed` when the stored key cannot sign `alg`.
    pub fn issue(&self, key_name: &str, alg: &str, config: &TokenConfig) -> Result<String, MockJwtError> {
        self.try_issue(key_name, alg, config).inspect_err(|e| {
            warn!(key_name = %key_name, algorithm = %alg, error = %e, "Token issuance failed");
            metrics::record_signing_error(e.code());
        })
    }

    fn try_issue(&self, key_name: &str, alg: &str, config: &TokenConfig) -> Result<String, MockJwtError> {
        let algorithm: SigningAlgorithm = alg.parse()?;
        let key = self.store.get_or_create_with(key_name, algorithm)?;

        let claims = ClaimsBuilder::from_config(config).build();
        let token = TokenSigner::new(&key, algorithm)?.sign_claims(&claims)?;

        metrics::record_token_signed(metrics::FLOW_ISSUE, algorithm);
        info!(key_name = %key_name, algorithm = %algorithm, subject = %config.subject, "Issued token");
        Ok(token)
    }
}
