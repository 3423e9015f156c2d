//! Re-signing externally supplied drafts under a stored key.
//!
//! The draft's claims are kept exactly; its header and signature are
//! dropped. A differing `alg` in the draft is overridden, not rejected.

use crate::error::MockJwtError;
use crate::jwt::signer::TokenSigner;
use crate::jwt::unverified::parse_claims_unverified;
use crate::keys::{KeyStore, SigningAlgorithm};
use crate::metrics;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Re-signs drafts with keys from a shared [`KeyStore`].
#[derive(Debug, Clone)]
pub struct TokenResigner {
    store: Arc<KeyStore>,
}

impl TokenResigner {
    /// Re-signer backed by `store`.
    #[must_use]
    pub fn new(store: Arc<KeyStore>) -> Self {
        TokenResigner { store }
    }

    /// Re-sign `raw_token` with the key stored under `key_name`.
    ///
    /// The draft is parsed before the key is resolved, so a malformed draft
    /// never creates a key.
    ///
    /// # Errors
    ///
    /// `MalformedToken` for unparsable input, then the same errors as
    /// [`crate::jwt::TokenIssuer::issue`].
    pub fn resign(&self, key_name: &str, alg: &str, raw_token: &str) -> Result<String, MockJwtError> {
        self.try_resign(key_name, alg, raw_token).inspect_err(|e| {
            warn!(key_name = %key_name, algorithm = %alg, error = %e, "Token re-signing failed");
            metrics::record_signing_error(e.code());
        })
    }

    fn try_resign(&self, key_name: &str, alg: &str, raw_token: &str) -> Result<String, MockJwtError> {
        let draft = parse_claims_unverified(raw_token)?;
        if let Some(draft_alg) = draft.header.get("alg").and_then(|v| v.as_str()) {
            if !draft_alg.eq_ignore_ascii_case(alg) {
                debug!(draft_alg = %draft_alg, algorithm = %alg, "Overriding draft algorithm");
            }
        }

        let algorithm: SigningAlgorithm = alg.parse()?;
        let key = self.store.get_or_create_with(key_name, algorithm)?;
        let token = TokenSigner::new(&key, algorithm)?.sign_claims(&draft.claims)?;

        metrics::record_token_signed(metrics::FLOW_RESIGN, algorithm);
        info!(
            key_name = %key_name,
            algorithm = %algorithm,
            claims = draft.claims.len(),
            "Re-signed token"
        );
        Ok(token)
    }
}
