//! Signature routines selected by key family.
//!
//! RSA and HMAC go through `jsonwebtoken`. ECDSA signs with the curve crates
//! directly because `jsonwebtoken` has no P-521 support; every curve goes the
//! same way so all EC signatures share one code path.

use crate::error::MockJwtError;
use crate::jwt::claims::ClaimSet;
use crate::jwt::header::JwsHeader;
use crate::jwt::serializer::signing_input;
use crate::keys::{KeyEntry, KeyMaterial, SigningAlgorithm};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::EncodingKey;
use p256::ecdsa::signature::Signer;
use rsa::pkcs1::EncodeRsaPrivateKey;

/// Signs with one stored key under one algorithm.
#[derive(Debug)]
pub struct TokenSigner<'a> {
    key: &'a KeyEntry,
    algorithm: SigningAlgorithm,
}

impl<'a> TokenSigner<'a> {
    /// Pair a key with the algorithm to sign under.
    ///
    /// # Errors
    ///
    /// Returns [`MockJwtError::SigningFailed`] if the key cannot produce
    /// `algorithm` signatures: a different family, or an ECDSA key on
    /// another curve.
    pub fn new(key: &'a KeyEntry, algorithm: SigningAlgorithm) -> Result<Self, MockJwtError> {
        let compatible = matches!(
            (key.material(), algorithm),
            (
                KeyMaterial::Rsa(_),
                SigningAlgorithm::RS256 | SigningAlgorithm::RS384 | SigningAlgorithm::RS512
            ) | (KeyMaterial::EcP256(_), SigningAlgorithm::ES256)
                | (KeyMaterial::EcP384(_), SigningAlgorithm::ES384)
                | (KeyMaterial::EcP521(_), SigningAlgorithm::ES512)
                | (
                    KeyMaterial::Hmac(_),
                    SigningAlgorithm::HS256 | SigningAlgorithm::HS384 | SigningAlgorithm::HS512
                )
        );

        if !compatible {
            return Err(MockJwtError::signing(format!(
                "key '{}' was generated for {} and cannot sign {}",
                key.name(),
                key.algorithm(),
                algorithm
            )));
        }

        Ok(Self { key, algorithm })
    }

    /// Algorithm written to the header.
    #[must_use]
    pub const fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    /// Key ID written to the header.
    #[must_use]
    pub fn key_id(&self) -> &str {
        self.key.name()
    }

    /// Sign `message`, returning the base64url signature segment.
    ///
    /// # Errors
    ///
    /// Returns [`MockJwtError::SigningFailed`] if the primitive rejects the
    /// input, or [`MockJwtError::KeyTypeUnsupported`] if the key cannot be
    /// encoded for it.
    pub fn sign(&self, message: &[u8]) -> Result<String, MockJwtError> {
        match self.key.material() {
            KeyMaterial::Rsa(key) => {
                let der = key
                    .to_pkcs1_der()
                    .map_err(|e| MockJwtError::KeyTypeUnsupported(format!("RSA key encoding: {e}")))?;
                self.sign_with(message, &EncodingKey::from_rsa_der(der.as_bytes()))
            }
            KeyMaterial::Hmac(secret) => {
                self.sign_with(message, &EncodingKey::from_secret(secret.as_bytes()))
            }
            KeyMaterial::EcP256(key) => {
                let signature: p256::ecdsa::Signature = key
                    .try_sign(message)
                    .map_err(|e| MockJwtError::signing(format!("ECDSA P-256: {e}")))?;
                Ok(URL_SAFE_NO_PAD.encode(signature.to_bytes()))
            }
            KeyMaterial::EcP384(key) => {
                let signature: p384::ecdsa::Signature = key
                    .try_sign(message)
                    .map_err(|e| MockJwtError::signing(format!("ECDSA P-384: {e}")))?;
                Ok(URL_SAFE_NO_PAD.encode(signature.to_bytes()))
            }
            KeyMaterial::EcP521(key) => {
                let signature: p521::ecdsa::Signature = key
                    .try_sign(message)
                    .map_err(|e| MockJwtError::signing(format!("ECDSA P-521: {e}")))?;
                Ok(URL_SAFE_NO_PAD.encode(signature.to_bytes()))
            }
        }
    }

    fn sign_with(&self, message: &[u8], key: &EncodingKey) -> Result<String, MockJwtError> {
        let algorithm = self.algorithm.to_jsonwebtoken().ok_or_else(|| {
            MockJwtError::KeyTypeUnsupported(format!("no jsonwebtoken routine for {}", self.algorithm))
        })?;
        Ok(jsonwebtoken::crypto::sign(message, key, algorithm)?)
    }

    /// Build a fresh `{alg, kid, typ}` header and return the signed compact token.
    ///
    /// # Errors
    ///
    /// Propagates serialization and signature failures.
    pub fn sign_claims(&self, claims: &ClaimSet) -> Result<String, MockJwtError> {
        let header = JwsHeader::new(self.algorithm, self.key_id());
        let input = signing_input(&header, claims)?;
        let signature = self.sign(input.as_bytes())?;
        Ok(format!("{input}.{signature}"))
    }
}
