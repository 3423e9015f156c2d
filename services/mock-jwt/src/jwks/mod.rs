//! JSON Web Key Set publishing.

pub mod publisher;

pub use publisher::{Jwk, JwkSet};
