//! Request handlers.
//!
//! Key generation and signing are CPU-bound, so they run on the blocking
//! pool rather than on the async workers.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::TokenConfig;
use crate::http::error::ApiError;
use crate::jwks::JwkSet;
use crate::jwt::{TokenIssuer, TokenResigner};
use crate::keys::KeyStore;
use crate::metrics;
use crate::oidc::OidcConfiguration;

/// Key name used by `GET /token`.
pub const DEFAULT_KEY_NAME: &str = "default";
/// Algorithm used by `GET /token`.
pub const DEFAULT_ALGORITHM: &str = "RS256";

/// Shared state: one key store, and the two signing flows built on it.
pub struct AppState {
    /// Named signing keys
    pub store: Arc<KeyStore>,
    /// `GET /token` flow
    pub issuer: TokenIssuer,
    /// `POST /{key_name}/{alg}` flow
    pub resigner: TokenResigner,
}

impl AppState {
    /// Build both flows on top of `store`.
    pub fn new(store: Arc<KeyStore>) -> Self {
        Self {
            issuer: TokenIssuer::new(Arc::clone(&store)),
            resigner: TokenResigner::new(Arc::clone(&store)),
            store,
        }
    }
}

/// Signed token response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Compact signed token
    pub token: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`
    pub status: String,
    /// Crate version
    pub version: String,
    /// Number of stored keys
    pub keys: usize,
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        keys: state.store.len(),
    })
}

/// GET /metrics
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::render(),
    )
}

/// GET /.well-known/jwks.json and GET /jwks
pub async fn jwks_handler(State(state): State<Arc<AppState>>) -> Json<JwkSet> {
    Json(JwkSet::build_all(&state.store.get_all()))
}

/// GET /.well-known/openid-configuration
pub async fn oidc_config_handler() -> Json<OidcConfiguration> {
    Json(OidcConfiguration::from_env())
}

/// GET /token
///
/// Issues a token with the `default` key and RS256, reading the claim
/// configuration from the environment on each call.
pub async fn token_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let config = TokenConfig::from_env();
    let token = tokio::task::spawn_blocking(move || {
        state.issuer.issue(DEFAULT_KEY_NAME, DEFAULT_ALGORITHM, &config)
    })
    .await??;

    Ok(Json(TokenResponse { token }))
}

/// GET /{key_name}/{alg}
///
/// Returns the key set for one key, generating the key on first request.
pub async fn key_jwks_handler(
    State(state): State<Arc<AppState>>,
    Path((key_name, alg)): Path<(String, String)>,
) -> Result<Json<JwkSet>, ApiError> {
    let handle = tokio::task::spawn_blocking(move || state.store.get_or_create(&key_name, &alg))
        .await??;

    Ok(Json(JwkSet::build_for(&handle)))
}

/// POST /{key_name}/{alg}
///
/// The request body is the draft token to re-sign.
pub async fn sign_handler(
    State(state): State<Arc<AppState>>,
    Path((key_name, alg)): Path<(String, String)>,
    body: String,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = tokio::task::spawn_blocking(move || state.resigner.resign(&key_name, &alg, &body))
        .await??;

    Ok(Json(TokenResponse { token }))
}

/// DELETE /{key_name}
pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(key_name): Path<String>,
) -> &'static str {
    state.store.delete(&key_name);
    "DELETED"
}

/// DELETE /{key_name}/{alg}
///
/// The algorithm segment is accepted for symmetry with GET and POST and ignored.
pub async fn delete_with_alg_handler(
    state: State<Arc<AppState>>,
    Path((key_name, _alg)): Path<(String, String)>,
) -> &'static str {
    delete_handler(state, Path(key_name)).await
}
