//! Token issuance, re-signing and compact serialization.

pub mod builder;
pub mod claims;
pub mod header;
pub mod issuer;
pub mod resigner;
pub mod serializer;
pub mod signer;
pub mod unverified;

pub use builder::ClaimsBuilder;
pub use claims::ClaimSet;
pub use header::JwsHeader;
pub use issuer::TokenIssuer;
pub use resigner::TokenResigner;
pub use signer::TokenSigner;
pub use unverified::{parse_claims_unverified, UnverifiedToken};
