//! Signing key generation and storage.

pub mod algorithm;
pub mod generator;
pub mod store;

pub use algorithm::{KeyFamily, SigningAlgorithm};
pub use generator::{generate, HmacSecret, KeyMaterial};
pub use store::{KeyEntry, KeyHandle, KeyStore};
