//! Shared helpers for integration tests.
//!
//! Signatures are checked only against what the key set publishes, the way
//! a relying party would.

#![allow(dead_code)]

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{Algorithm, DecodingKey};
use mock_jwt::jwks::Jwk;
use p256::ecdsa::signature::Verifier;
use serde_json::Value;

pub const ALL_ALGORITHMS: [&str; 9] = [
    "RS256", "RS384", "RS512", "ES256", "ES384", "ES512", "HS256", "HS384", "HS512",
];

/// Decode a base64url JSON segment of a compact token.
pub fn decode_segment(segment: &str) -> Value {
    let bytes = URL_SAFE_NO_PAD.decode(segment).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Header and payload of a compact token.
pub fn header_and_payload(token: &str) -> (Value, Value) {
    let mut parts = token.split('.');
    let header = decode_segment(parts.next().unwrap());
    let payload = decode_segment(parts.next().unwrap());
    (header, payload)
}

/// Base64url-encode a draft header and payload, without a signature segment.
pub fn draft(header: &str, payload: &str) -> String {
    format!("{}.{}", URL_SAFE_NO_PAD.encode(header), URL_SAFE_NO_PAD.encode(payload))
}

fn b64(field: &Option<String>) -> Vec<u8> {
    URL_SAFE_NO_PAD.decode(field.as_deref().unwrap()).unwrap()
}

fn sec1_point(jwk: &Jwk) -> Vec<u8> {
    let mut point = vec![0x04];
    point.extend(b64(&jwk.x));
    point.extend(b64(&jwk.y));
    point
}

/// Verify a compact token's signature with the algorithm in its header and
/// the published key material.
pub fn verify_with_jwk(token: &str, jwk: &Jwk) -> bool {
    let (input, signature) = token.rsplit_once('.').unwrap();
    let (header, _) = header_and_payload(token);
    let alg = header["alg"].as_str().unwrap();

    match alg {
        "RS256" | "RS384" | "RS512" => {
            let key = DecodingKey::from_rsa_components(
                jwk.n.as_deref().unwrap(),
                jwk.e.as_deref().unwrap(),
            )
            .unwrap();
            jsonwebtoken::crypto::verify(signature, input.as_bytes(), &key, alg.parse().unwrap())
                .unwrap()
        }
        "HS256" | "HS384" | "HS512" => {
            let key = DecodingKey::from_secret(&b64(&jwk.k));
            let alg: Algorithm = alg.parse().unwrap();
            jsonwebtoken::crypto::verify(signature, input.as_bytes(), &key, alg).unwrap()
        }
        "ES256" => {
            let key = p256::ecdsa::VerifyingKey::from_sec1_bytes(&sec1_point(jwk)).unwrap();
            let sig = p256::ecdsa::Signature::from_slice(&URL_SAFE_NO_PAD.decode(signature).unwrap())
                .unwrap();
            key.verify(input.as_bytes(), &sig).is_ok()
        }
        "ES384" => {
            let key = p384::ecdsa::VerifyingKey::from_sec1_bytes(&sec1_point(jwk)).unwrap();
            let sig = p384::ecdsa::Signature::from_slice(&URL_SAFE_NO_PAD.decode(signature).unwrap())
                .unwrap();
            key.verify(input.as_bytes(), &sig).is_ok()
        }
        "ES512" => {
            let key = p521::ecdsa::VerifyingKey::from_sec1_bytes(&sec1_point(jwk)).unwrap();
            let sig = p521::ecdsa::Signature::from_slice(&URL_SAFE_NO_PAD.decode(signature).unwrap())
                .unwrap();
            key.verify(input.as_bytes(), &sig).is_ok()
        }
        other => panic!("unexpected algorithm {other}"),
    }
}
