//! Mock identity provider library.
//!
//! Generates named signing keys on demand, publishes them as JSON Web Key
//! Sets, issues tokens from configured claims and re-signs caller-supplied
//! drafts. Intended for integration tests of services that verify JWTs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod http;
pub mod jwks;
pub mod jwt;
pub mod keys;
pub mod metrics;
pub mod oidc;

// Re-exports for convenience
pub use config::{ServerConfig, TokenConfig};
pub use error::MockJwtError;
pub use jwks::{Jwk, JwkSet};
pub use jwt::{TokenIssuer, TokenResigner};
pub use keys::{KeyStore, SigningAlgorithm};
