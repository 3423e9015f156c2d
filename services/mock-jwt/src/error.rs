//! Error taxonomy for key management and token signing.
//!
//! Every failure is returned as a value; nothing here aborts the process or
//! leaves the key store half-updated.

use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Errors surfaced by the key store, the signers and configuration loading.
#[derive(Error, Debug)]
pub enum MockJwtError {
    /// Algorithm identifier is not one of the nine supported values.
    #[error("unsupported algorithm: '{0}', must be one of: RS256, RS384, RS512, ES256, ES384, ES512, HS256, HS384, HS512")]
    UnsupportedAlgorithm(String),

    /// Random source or key generation primitive failed.
    #[error("key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// Input token could not be parsed structurally.
    #[error("failed to parse token: {0}")]
    MalformedToken(String),

    /// Signature routine rejected the key or claim set.
    #[error("failed to sign token: {0}")]
    SigningFailed(String),

    /// Stored key value has no usable signing routine.
    #[error("unsupported key type: {0}")]
    KeyTypeUnsupported(String),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MockJwtError {
    /// Create an unsupported algorithm error for the given identifier.
    #[must_use]
    pub fn unsupported_algorithm(alg: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm(alg.into())
    }

    /// Create a key generation error.
    #[must_use]
    pub fn key_generation(msg: impl Into<String>) -> Self {
        Self::KeyGenerationFailed(msg.into())
    }

    /// Create a malformed token error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedToken(msg.into())
    }

    /// Create a signing error.
    #[must_use]
    pub fn signing(msg: impl Into<String>) -> Self {
        Self::SigningFailed(msg.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedAlgorithm(_) => UNSUPPORTED_ALGORITHM,
            Self::KeyGenerationFailed(_) => KEY_GENERATION_FAILED,
            Self::MalformedToken(_) => MALFORMED_TOKEN,
            Self::SigningFailed(_) => SIGNING_FAILED,
            Self::KeyTypeUnsupported(_) => KEY_TYPE_UNSUPPORTED,
            Self::Config(_) => CONFIG_ERROR,
        }
    }

    /// Whether the caller supplied bad input, as opposed to a server-side failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::UnsupportedAlgorithm(_) | Self::MalformedToken(_))
    }
}

impl From<jsonwebtoken::errors::Error> for MockJwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidKeyFormat | ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidEcdsaKey => {
                Self::KeyTypeUnsupported(err.to_string())
            }
            _ => Self::SigningFailed(err.to_string()),
        }
    }
}

// Error codes for HTTP responses and metrics labels
/// Code for [`MockJwtError::UnsupportedAlgorithm`].
pub const UNSUPPORTED_ALGORITHM: &str = "UNSUPPORTED_ALGORITHM";
/// Code for [`MockJwtError::KeyGenerationFailed`].
pub const KEY_GENERATION_FAILED: &str = "KEY_GENERATION_FAILED";
/// Code for [`MockJwtError::MalformedToken`].
pub const MALFORMED_TOKEN: &str = "MALFORMED_TOKEN";
/// Code for [`MockJwtError::SigningFailed`].
pub const SIGNING_FAILED: &str = "SIGNING_FAILED";
/// Code for [`MockJwtError::KeyTypeUnsupported`].
pub const KEY_TYPE_UNSUPPORTED: &str = "KEY_TYPE_UNSUPPORTED";
/// Code for [`MockJwtError::Config`].
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
