//! Fresh key material for a signing algorithm.

use crate::error::MockJwtError;
use crate::keys::algorithm::{KeyFamily, SigningAlgorithm};
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::RsaPrivateKey;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// RSA modulus size for every RS* algorithm.
pub const RSA_KEY_BITS: usize = 2048;

/// Length of generated HMAC secrets.
pub const HMAC_SECRET_LEN: usize = 32;

/// Shared secret for the HS* family, wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HmacSecret([u8; HMAC_SECRET_LEN]);

impl HmacSecret {
    /// Raw secret bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Generated key, tagged by family (and curve for ECDSA).
pub enum KeyMaterial {
    /// RSA private key, public half derivable
    Rsa(Box<RsaPrivateKey>),
    /// ECDSA P-256 signing key
    EcP256(p256::ecdsa::SigningKey),
    /// ECDSA P-384 signing key
    EcP384(p384::ecdsa::SigningKey),
    /// ECDSA P-521 signing key
    EcP521(p521::ecdsa::SigningKey),
    /// HMAC shared secret
    Hmac(HmacSecret),
}

impl KeyMaterial {
    /// Family this key belongs to.
    #[must_use]
    pub const fn family(&self) -> KeyFamily {
        match self {
            Self::Rsa(_) => KeyFamily::Rsa,
            Self::EcP256(_) | Self::EcP384(_) | Self::EcP521(_) => KeyFamily::Ec,
            Self::Hmac(_) => KeyFamily::Hmac,
        }
    }

    /// JWK curve name for ECDSA keys.
    #[must_use]
    pub const fn curve(&self) -> Option<&'static str> {
        match self {
            Self::EcP256(_) => Some("P-256"),
            Self::EcP384(_) => Some("P-384"),
            Self::EcP521(_) => Some("P-521"),
            Self::Rsa(_) | Self::Hmac(_) => None,
        }
    }
}

// Never print key bytes.
impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("family", &self.family())
            .field("curve", &self.curve())
            .finish_non_exhaustive()
    }
}

/// Generate new key material for `alg` from the OS random source.
///
/// # Errors
///
/// Returns [`MockJwtError::KeyGenerationFailed`] if the RNG or the RSA
/// prime search fails. Nothing is retried.
pub fn generate(alg: SigningAlgorithm) -> Result<KeyMaterial, MockJwtError> {
    let mut rng = OsRng;
    let material = match alg {
        SigningAlgorithm::RS256 | SigningAlgorithm::RS384 | SigningAlgorithm::RS512 => {
            let key = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS)
                .map_err(|e| MockJwtError::key_generation(format!("RSA: {e}")))?;
            KeyMaterial::Rsa(Box::new(key))
        }
        SigningAlgorithm::ES256 => KeyMaterial::EcP256(p256::ecdsa::SigningKey::random(&mut rng)),
        SigningAlgorithm::ES384 => KeyMaterial::EcP384(p384::ecdsa::SigningKey::random(&mut rng)),
        SigningAlgorithm::ES512 => KeyMaterial::EcP521(p521::ecdsa::SigningKey::random(&mut rng)),
        SigningAlgorithm::HS256 | SigningAlgorithm::HS384 | SigningAlgorithm::HS512 => {
            let mut secret = [0u8; HMAC_SECRET_LEN];
            rng.try_fill_bytes(&mut secret)
                .map_err(|e| MockJwtError::key_generation(format!("random source: {e}")))?;
            KeyMaterial::Hmac(HmacSecret(secret))
        }
    };
    Ok(material)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::traits::PublicKeyParts;

    #[test]
    fn test_rsa_key_size() {
        let key = generate(SigningAlgorithm::RS384).unwrap();
        match key {
            KeyMaterial::Rsa(k) => assert_eq!(k.size() * 8, RSA_KEY_BITS),
            other => panic!("expected RSA key, got {other:?}"),
        }
    }

    #[test]
    fn test_ec_curves() {
        assert_eq!(generate(SigningAlgorithm::ES256).unwrap().curve(), Some("P-256"));
        assert_eq!(generate(SigningAlgorithm::ES384).unwrap().curve(), Some("P-384"));
        assert_eq!(generate(SigningAlgorithm::ES512).unwrap().curve(), Some("P-521"));
    }

    #[test]
    fn test_hmac_secrets_are_random() {
        let a = generate(SigningAlgorithm::HS256).unwrap();
        let b = generate(SigningAlgorithm::HS512).unwrap();
        match (a, b) {
            (KeyMaterial::Hmac(a), KeyMaterial::Hmac(b)) => {
                assert_eq!(a.as_bytes().len(), HMAC_SECRET_LEN);
                assert_ne!(a.as_bytes(), b.as_bytes());
            }
            other => panic!("expected HMAC secrets, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_hides_key_bytes() {
        let key = generate(SigningAlgorithm::HS256).unwrap();
        let rendered = format!("{key:?}");
        assert!(rendered.contains("Hmac"));
        assert!(!rendered.contains("secret"));
    }
}
