//! Claim set of freshly issued tokens.

use crate::config::TokenConfig;
use crate::jwt::claims::{self, ClaimSet};
use std::collections::HashMap;

/// Lifetime of issued tokens.
pub const TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Builds the claim set for a freshly issued token.
///
/// Standard claims are written first, custom claims last, so a custom claim
/// with a standard name wins.
pub struct ClaimsBuilder {
    issuer: String,
    subject: String,
    audience: String,
    name: String,
    email: String,
    custom_claims: HashMap<String, String>,
}

impl ClaimsBuilder {
    /// Start from the issuance configuration.
    #[must_use]
    pub fn from_config(config: &TokenConfig) -> Self {
        ClaimsBuilder {
            issuer: config.issuer.clone(),
            subject: config.subject.clone(),
            audience: config.audience.clone(),
            name: config.name.clone(),
            email: config.email.clone(),
            custom_claims: config.extra_claims.clone(),
        }
    }

    /// Build with `iat` set to the current time.
    #[must_use]
    pub fn build(self) -> ClaimSet {
        let now = chrono::Utc::now().timestamp();
        self.build_at(now)
    }

    /// Build with `iat` set to `now` (Unix seconds).
    #[must_use]
    pub fn build_at(self, now: i64) -> ClaimSet {
        let mut claims = ClaimSet::new();
        claims.insert(claims::SUBJECT, self.subject);
        claims.insert(claims::NAME, self.name);
        claims.insert(claims::EMAIL, self.email);
        claims.insert(claims::ISSUER, self.issuer);
        claims.insert(claims::AUDIENCE, self.audience);
        claims.insert(claims::ISSUED_AT, now);
        claims.insert(claims::EXPIRES_AT, now + TOKEN_TTL_SECONDS);

        for (key, value) in self.custom_claims {
            claims.insert(key, value);
        }

        claims
    }
}
