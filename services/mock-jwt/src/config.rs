//! Configuration for the mock identity provider.
//!
//! Server settings are loaded once at startup. Token issuance settings are
//! re-read from the environment on every `/token` request, so a test harness
//! can change claims without restarting the process.

use crate::error::MockJwtError;
use std::collections::HashMap;
use std::env;

/// Default issuer claim.
pub const DEFAULT_ISSUER: &str = "mock-jwt-server";
/// Default subject claim.
pub const DEFAULT_SUBJECT: &str = "test-subject";
/// Default audience claim.
pub const DEFAULT_AUDIENCE: &str = "test-audience";
/// Default display name claim.
pub const DEFAULT_NAME: &str = "test-name";
/// Default email claim.
pub const DEFAULT_EMAIL: &str = "test-email";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, MockJwtError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a valid port number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MockJwtError> {
        let host = non_empty(&lookup, "HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var(&lookup, "PORT", 8080)?;
        let log_level = non_empty(&lookup, "LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let log_format = match non_empty(&lookup, "LOG_FORMAT").as_deref() {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            host,
            port,
            log_level,
            log_format,
        })
    }

    /// `host:port` bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Claims used when issuing a fresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    /// `iss` claim
    pub issuer: String,
    /// `sub` claim
    pub subject: String,
    /// `aud` claim
    pub audience: String,
    /// `name` claim
    pub name: String,
    /// `email` claim
    pub email: String,
    /// Additional string claims, applied after the standard ones
    pub extra_claims: HashMap<String, String>,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            name: DEFAULT_NAME.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            extra_claims: HashMap::new(),
        }
    }
}

impl TokenConfig {
    /// Read `ISSUER`, `SUBJECT`, `AUDIENCE`, `NAME`, `EMAIL` and `EXTRA_CLAIMS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build through an arbitrary variable lookup. Unset or empty values
    /// fall back to the defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let or_default = |name: &str, default: &str| {
            non_empty(&lookup, name).unwrap_or_else(|| default.to_string())
        };

        Self {
            issuer: or_default("ISSUER", DEFAULT_ISSUER),
            subject: or_default("SUBJECT", DEFAULT_SUBJECT),
            audience: or_default("AUDIENCE", DEFAULT_AUDIENCE),
            name: or_default("NAME", DEFAULT_NAME),
            email: or_default("EMAIL", DEFAULT_EMAIL),
            extra_claims: lookup("EXTRA_CLAIMS")
                .map(|raw| parse_extra_claims(&raw))
                .unwrap_or_default(),
        }
    }
}

/// Parse `k1=v1;k2=v2`. Entries that do not split into exactly two parts
/// on `=` are dropped.
#[must_use]
pub fn parse_extra_claims(raw: &str) -> HashMap<String, String> {
    raw.split(';')
        .filter_map(|entry| {
            let parts: Vec<&str> = entry.split('=').collect();
            match parts.as_slice() {
                [key, value] => Some(((*key).to_string(), (*value).to_string())),
                _ => None,
            }
        })
        .collect()
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|v| !v.is_empty())
}

/// Parse variable with default value.
fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, MockJwtError>
where
    T::Err: std::fmt::Display,
{
    match non_empty(lookup, name) {
        Some(val) => val
            .parse()
            .map_err(|e| MockJwtError::config(format!("Invalid {name}: {e}"))),
        None => Ok(default),
    }
}
