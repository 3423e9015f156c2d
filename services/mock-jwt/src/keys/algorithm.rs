//! Supported JWS signing algorithms and their key families.

use crate::error::MockJwtError;
use std::fmt;
use std::str::FromStr;

/// Key family: decides both how a key is generated and which signature
/// routine it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    /// RSA key pair (PKCS#1 v1.5 signatures)
    Rsa,
    /// ECDSA key pair on a NIST curve
    Ec,
    /// Shared HMAC secret
    Hmac,
}

impl KeyFamily {
    /// Lower-case family name used in logs and metric labels.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rsa => "rsa",
            Self::Ec => "ec",
            Self::Hmac => "hmac",
        }
    }
}

/// JWS signing algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigningAlgorithm {
    /// RSA with SHA-256
    RS256,
    /// RSA with SHA-384
    RS384,
    /// RSA with SHA-512
    RS512,
    /// ECDSA with P-256 and SHA-256
    ES256,
    /// ECDSA with P-384 and SHA-384
    ES384,
    /// ECDSA with P-521 and SHA-512
    ES512,
    /// HMAC with SHA-256
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    HS512,
}

impl SigningAlgorithm {
    /// Every supported algorithm, in the order advertised by discovery.
    pub const SUPPORTED: [Self; 9] = [
        Self::RS256,
        Self::RS384,
        Self::RS512,
        Self::ES256,
        Self::ES384,
        Self::ES512,
        Self::HS256,
        Self::HS384,
        Self::HS512,
    ];

    /// Get algorithm name for JWT header.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RS256 => "RS256",
            Self::RS384 => "RS384",
            Self::RS512 => "RS512",
            Self::ES256 => "ES256",
            Self::ES384 => "ES384",
            Self::ES512 => "ES512",
            Self::HS256 => "HS256",
            Self::HS384 => "HS384",
            Self::HS512 => "HS512",
        }
    }

    /// Key family this algorithm signs with.
    #[must_use]
    pub const fn family(&self) -> KeyFamily {
        match self {
            Self::RS256 | Self::RS384 | Self::RS512 => KeyFamily::Rsa,
            Self::ES256 | Self::ES384 | Self::ES512 => KeyFamily::Ec,
            Self::HS256 | Self::HS384 | Self::HS512 => KeyFamily::Hmac,
        }
    }

    /// The `jsonwebtoken` equivalent, when that crate implements it.
    ///
    /// `jsonwebtoken` has no ES512, so P-521 signing goes through `p521`.
    #[must_use]
    pub const fn to_jsonwebtoken(&self) -> Option<jsonwebtoken::Algorithm> {
        use jsonwebtoken::Algorithm;
        match self {
            Self::RS256 => Some(Algorithm::RS256),
            Self::RS384 => Some(Algorithm::RS384),
            Self::RS512 => Some(Algorithm::RS512),
            Self::ES256 => Some(Algorithm::ES256),
            Self::ES384 => Some(Algorithm::ES384),
            Self::ES512 => None,
            Self::HS256 => Some(Algorithm::HS256),
            Self::HS384 => Some(Algorithm::HS384),
            Self::HS512 => Some(Algorithm::HS512),
        }
    }
}

impl FromStr for SigningAlgorithm {
    type Err = MockJwtError;

    /// Parse algorithm from string, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_uppercase();
        Self::SUPPORTED
            .into_iter()
            .find(|alg| alg.as_str() == normalized)
            .ok_or_else(|| MockJwtError::unsupported_algorithm(s))
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
