//! Integration tests for the HTTP routes.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use mock_jwt::http::{create_router, AppState};
use mock_jwt::jwks::JwkSet;
use mock_jwt::keys::KeyStore;
use serde_json::Value;
use tower::ServiceExt;

mod common;
use common::{draft, header_and_payload, verify_with_jwk};

fn test_app() -> (Router, Arc<KeyStore>) {
    let store = Arc::new(KeyStore::new());
    let app = create_router(Arc::new(AppState::new(Arc::clone(&store))));
    (app, store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, Method::GET, uri, Body::empty()).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app();

    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["keys"], 0);
}

#[tokio::test]
async fn test_key_route_creates_and_publishes_key() {
    let (app, store) = test_app();

    let (status, body) = get_json(&app, "/service-a/es384").await;

    assert_eq!(status, StatusCode::OK);
    let jwks: JwkSet = serde_json::from_value(body).unwrap();
    assert_eq!(jwks.keys.len(), 1);
    assert_eq!(jwks.keys[0].kid, "service-a");
    assert_eq!(jwks.keys[0].kty, "EC");
    assert_eq!(jwks.keys[0].crv.as_deref(), Some("P-384"));
    assert_eq!(jwks.keys[0].key_use, "sig");
    assert_eq!(store.len(), 1);

    // Second request returns the same key.
    let (_, again) = get_json(&app, "/service-a/ES384").await;
    let again: JwkSet = serde_json::from_value(again).unwrap();
    assert_eq!(again, jwks);
}

#[tokio::test]
async fn test_unsupported_algorithm_is_bad_request() {
    let (app, store) = test_app();

    let (status, body) = get_json(&app, "/service-a/PS256").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNSUPPORTED_ALGORITHM");
    assert!(body["error"].as_str().unwrap().contains("PS256"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_full_jwks_lists_every_key() {
    let (app, _) = test_app();
    for uri in ["/b/HS256", "/a/ES256"] {
        let (status, _) = send(&app, Method::GET, uri, Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
    }

    for uri in ["/.well-known/jwks.json", "/jwks"] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK);

        let jwks: JwkSet = serde_json::from_value(body).unwrap();
        let kids: Vec<&str> = jwks.keys.iter().map(|k| k.kid.as_str()).collect();
        assert_eq!(kids, ["a", "b"]);
    }
}

#[tokio::test]
async fn test_sign_route_resigns_draft() {
    let (app, store) = test_app();
    let raw = draft(r#"{"alg":"ES256","typ":"JWT"}"#, r#"{"sub":"x","scope":"read"}"#);

    let (status, body) = send(&app, Method::POST, "/k/ES256", Body::from(raw)).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    let token = body["token"].as_str().unwrap();
    let (header, payload) = header_and_payload(token);
    assert_eq!(header["kid"], "k");
    assert_eq!(payload["sub"], "x");
    assert_eq!(payload["scope"], "read");

    let jwks = JwkSet::build_for(&store.get("k").unwrap());
    assert!(verify_with_jwk(token, &jwks.keys[0]));
}

#[tokio::test]
async fn test_sign_route_rejects_malformed_draft() {
    let (app, store) = test_app();

    let (status, body) = send(&app, Method::POST, "/k/HS256", Body::from("not-a-jwt")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["code"], "MALFORMED_TOKEN");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_token_route_uses_default_key() {
    let (app, store) = test_app();

    let (status, body) = get_json(&app, "/token").await;

    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();
    let (header, payload) = header_and_payload(token);
    assert_eq!(header["alg"], "RS256");
    assert_eq!(header["kid"], "default");
    assert!(payload["exp"].as_i64().unwrap() > payload["iat"].as_i64().unwrap());

    let jwks = JwkSet::build_for(&store.get("default").unwrap());
    assert!(verify_with_jwk(token, &jwks.keys[0]));
}

#[tokio::test]
async fn test_delete_routes() {
    let (app, store) = test_app();
    for uri in ["/one/HS256", "/two/HS512"] {
        send(&app, Method::GET, uri, Body::empty()).await;
    }
    assert_eq!(store.len(), 2);

    let (status, body) = send(&app, Method::DELETE, "/one", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"DELETED");

    let (status, body) = send(&app, Method::DELETE, "/two/HS512", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"DELETED");
    assert!(store.is_empty());

    // Deleting an absent key is not an error.
    let (status, _) = send(&app, Method::DELETE, "/missing", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_openid_configuration() {
    let (app, _) = test_app();

    let (status, body) = get_json(&app, "/.well-known/openid-configuration").await;

    assert_eq!(status, StatusCode::OK);
    let jwks_uri = body["jwks_uri"].as_str().unwrap();
    assert!(jwks_uri.ends_with("/.well-known/jwks.json"));
    assert_eq!(body["id_token_signing_alg_values_supported"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (app, _) = test_app();
    send(&app, Method::GET, "/token", Body::empty()).await;

    let (status, body) = send(&app, Method::GET, "/metrics", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("mock_jwt_tokens_signed_total"));
    assert!(text.contains("mock_jwt_keys_generated_total"));
}
