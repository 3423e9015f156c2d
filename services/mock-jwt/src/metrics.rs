//! Prometheus metrics for the mock identity provider.
//!
//! Provides counters and histograms for key generation and signing.

use crate::keys::{KeyFamily, SigningAlgorithm};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

/// `flow` label for freshly issued tokens.
pub const FLOW_ISSUE: &str = "issue";
/// `flow` label for re-signed drafts.
pub const FLOW_RESIGN: &str = "resign";

/// Keys generated and stored. Candidates discarded after losing a creation
/// race are not counted.
pub static KEYS_GENERATED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "mock_jwt_keys_generated_total",
        "Total number of signing keys generated",
        &["family"]
    )
    .expect("Failed to register keys_generated metric")
});

/// Key generation latency histogram.
pub static KEY_GENERATION_LATENCY: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "mock_jwt_key_generation_seconds",
        "Key generation latency in seconds",
        &["family"],
        vec![0.0001, 0.001, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register key_generation_latency metric")
});

/// Tokens signed counter.
pub static TOKENS_SIGNED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "mock_jwt_tokens_signed_total",
        "Total number of tokens signed",
        &["flow", "algorithm"]
    )
    .expect("Failed to register tokens_signed metric")
});

/// Signing failures counter.
pub static SIGNING_ERRORS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "mock_jwt_signing_errors_total",
        "Total number of failed issue or re-sign requests",
        &["code"]
    )
    .expect("Failed to register signing_errors metric")
});

/// Record a stored key and how long its generation took.
pub fn record_key_generated(family: KeyFamily, duration_secs: f64) {
    KEYS_GENERATED.with_label_values(&[family.as_str()]).inc();
    KEY_GENERATION_LATENCY
        .with_label_values(&[family.as_str()])
        .observe(duration_secs);
}

/// Record a signed token.
pub fn record_token_signed(flow: &str, algorithm: SigningAlgorithm) {
    TOKENS_SIGNED
        .with_label_values(&[flow, algorithm.as_str()])
        .inc();
}

/// Record a failed signing request by error code.
pub fn record_signing_error(code: &str) {
    SIGNING_ERRORS.with_label_values(&[code]).inc();
}

/// Render every registered metric in the Prometheus text format.
#[must_use]
pub fn render() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if encoder.encode(&prometheus::gather(), &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
