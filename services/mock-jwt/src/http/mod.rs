//! HTTP surface of the mock identity provider.

pub mod error;
pub mod handlers;

use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use handlers::AppState;

/// Endpoint summary logged at startup.
pub const USAGE: &str = "\
GET    /token                             - Issue token with default key/alg (RS256)
GET    /.well-known/jwks.json             - Get complete JWKS
GET    /.well-known/openid-configuration  - OIDC discovery document
GET    /<key_name>/<algorithm>            - Get/create specified JWKS
POST   /<key_name>/<algorithm>            - Sign token with specified key/alg
DELETE /<key_name>                        - Delete key";

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/.well-known/jwks.json", get(handlers::jwks_handler))
        .route("/.well-known/openid-configuration", get(handlers::oidc_config_handler))
        .route("/jwks", get(handlers::jwks_handler))
        .route("/token", get(handlers::token_handler))
        .route("/{key_name}", delete(handlers::delete_handler))
        .route(
            "/{key_name}/{alg}",
            get(handlers::key_jwks_handler)
                .post(handlers::sign_handler)
                .delete(handlers::delete_with_alg_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
