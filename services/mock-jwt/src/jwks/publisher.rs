//! Projection of stored keys into RFC 7517 JSON Web Keys.
//!
//! This is a test double: private components (`d`, RSA CRT values, the HMAC
//! `k`) are published next to the public ones so test harnesses can inspect
//! or reuse the keys.

use crate::keys::{KeyEntry, KeyHandle, KeyMaterial};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::BigUint;
use serde::{Deserialize, Serialize};

/// Declared key use for every published key.
pub const KEY_USE_SIGNATURE: &str = "sig";

/// One published key. Which optional members are set depends on `kty`:
/// `RSA` carries `n`, `e` and the private CRT values, `EC` carries `crv`,
/// `x`, `y` and `d`, `oct` carries `k`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Jwk {
    /// Key type: `RSA`, `EC` or `oct`
    pub kty: String,
    /// Key name
    pub kid: String,
    /// Always `sig`
    #[serde(rename = "use")]
    pub key_use: String,
    /// Algorithm the key was generated for
    pub alg: String,
    /// RSA modulus
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    /// RSA public exponent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    /// EC curve name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    /// EC x coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// EC y coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    /// RSA private exponent or EC private scalar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    /// RSA first prime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    /// RSA second prime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// RSA first CRT exponent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    /// RSA second CRT exponent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    /// RSA CRT coefficient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
    /// HMAC secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
}

impl Jwk {
    fn empty(kty: &str, entry: &KeyEntry) -> Self {
        Self {
            kty: kty.to_string(),
            kid: entry.name().to_string(),
            key_use: KEY_USE_SIGNATURE.to_string(),
            alg: entry.algorithm().as_str().to_string(),
            n: None,
            e: None,
            crv: None,
            x: None,
            y: None,
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
            k: None,
        }
    }
}

impl From<&KeyEntry> for Jwk {
    fn from(entry: &KeyEntry) -> Self {
        match entry.material() {
            KeyMaterial::Rsa(key) => {
                let primes = key.primes();
                Self {
                    n: Some(b64_uint(key.n())),
                    e: Some(b64_uint(key.e())),
                    d: Some(b64_uint(key.d())),
                    p: primes.first().map(b64_uint),
                    q: primes.get(1).map(b64_uint),
                    dp: key.dp().map(b64_uint),
                    dq: key.dq().map(b64_uint),
                    qi: key.crt_coefficient().as_ref().map(b64_uint),
                    ..Self::empty("RSA", entry)
                }
            }
            KeyMaterial::EcP256(key) => {
                let point = p256::ecdsa::VerifyingKey::from(key).to_encoded_point(false);
                Self {
                    crv: Some("P-256".to_string()),
                    x: point.x().map(b64),
                    y: point.y().map(b64),
                    d: Some(b64(key.to_bytes())),
                    ..Self::empty("EC", entry)
                }
            }
            KeyMaterial::EcP384(key) => {
                let point = p384::ecdsa::VerifyingKey::from(key).to_encoded_point(false);
                Self {
                    crv: Some("P-384".to_string()),
                    x: point.x().map(b64),
                    y: point.y().map(b64),
                    d: Some(b64(key.to_bytes())),
                    ..Self::empty("EC", entry)
                }
            }
            KeyMaterial::EcP521(key) => {
                let point = p521::ecdsa::VerifyingKey::from(key).to_encoded_point(false);
                Self {
                    crv: Some("P-521".to_string()),
                    x: point.x().map(b64),
                    y: point.y().map(b64),
                    d: Some(b64(key.to_bytes())),
                    ..Self::empty("EC", entry)
                }
            }
            KeyMaterial::Hmac(secret) => Self {
                k: Some(b64(secret.as_bytes())),
                ..Self::empty("oct", entry)
            },
        }
    }
}

fn b64(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

fn b64_uint(value: &BigUint) -> String {
    b64(value.to_bytes_be())
}

/// `{"keys": [...]}` document served to relying parties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct JwkSet {
    /// Published keys
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    /// Key set containing exactly one key.
    pub fn build_for(handle: &KeyHandle) -> Self {
        JwkSet {
            keys: vec![Jwk::from(handle.as_ref())],
        }
    }

    /// One entry per handle, in the order given.
    pub fn build_all(handles: &[KeyHandle]) -> Self {
        JwkSet {
            keys: handles.iter().map(|h| Jwk::from(h.as_ref())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyStore;

    #[test]
    fn test_rsa_jwk_fields() {
        let store = KeyStore::new();
        let handle = store.get_or_create("rsa-key", "RS256").unwrap();
        let jwks = JwkSet::build_for(&handle);

        assert_eq!(jwks.keys.len(), 1);
        let jwk = &jwks.keys[0];
        assert_eq!(jwk.kty, "RSA");
        assert_eq!(jwk.kid, "rsa-key");
        assert_eq!(jwk.key_use, "sig");
        assert_eq!(jwk.alg, "RS256");
        assert_eq!(jwk.e.as_deref(), Some("AQAB"));
        for part in [&jwk.n, &jwk.d, &jwk.p, &jwk.q, &jwk.dp, &jwk.dq, &jwk.qi] {
            assert!(part.is_some());
        }
        assert!(jwk.k.is_none());
    }

    #[test]
    fn test_ec_coordinate_widths() {
        let store = KeyStore::new();
        for (name, alg, width) in [("p256", "ES256", 32), ("p384", "ES384", 48), ("p521", "ES512", 66)] {
            let handle = store.get_or_create(name, alg).unwrap();
            let jwk = Jwk::from(handle.as_ref());
            assert_eq!(jwk.kty, "EC");
            for coord in [&jwk.x, &jwk.y, &jwk.d] {
                let decoded = URL_SAFE_NO_PAD.decode(coord.as_ref().unwrap()).unwrap();
                assert_eq!(decoded.len(), width, "{alg}");
            }
        }
    }

    #[test]
    fn test_hmac_jwk_exposes_secret() {
        let store = KeyStore::new();
        let handle = store.get_or_create("shared", "HS384").unwrap();
        let jwk = Jwk::from(handle.as_ref());

        assert_eq!(jwk.kty, "oct");
        let k = URL_SAFE_NO_PAD.decode(jwk.k.unwrap()).unwrap();
        assert_eq!(k.len(), 32);
        assert!(jwk.n.is_none() && jwk.x.is_none());
    }

    #[test]
    fn test_build_all_follows_snapshot_order() {
        let store = KeyStore::new();
        store.get_or_create("two", "HS256").unwrap();
        store.get_or_create("one", "HS256").unwrap();

        let jwks = JwkSet::build_all(&store.get_all());
        let kids: Vec<&str> = jwks.keys.iter().map(|k| k.kid.as_str()).collect();
        assert_eq!(kids, vec!["one", "two"]);
    }

    #[test]
    fn test_empty_set_serializes_keys_array() {
        let json = serde_json::to_value(JwkSet::build_all(&[])).unwrap();
        assert_eq!(json, serde_json::json!({ "keys": [] }));
    }
}
