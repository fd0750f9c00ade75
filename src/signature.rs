//! HMAC signing for outbound webhook bodies.
//!
//! The OneRoom backend authenticates Canvas-originated requests with an
//! HMAC-SHA256 signature over the serialized body, sent alongside the bearer
//! token. Signing is skipped entirely when no signing secret is configured.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs serialized payload bodies with the shared Canvas webhook secret.
pub struct PayloadSigner {
    secret: String,
}

impl PayloadSigner {
    /// Creates a signer for the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Hex-encoded HMAC-SHA256 over `<timestamp>.<body>`.
    pub fn sign(&self, timestamp: i64, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Full header value, `t=<timestamp>,v1=<hex-signature>`.
    pub fn header_value(&self, timestamp: i64, body: &[u8]) -> String {
        format!("t={},v1={}", timestamp, self.sign(timestamp, body))
    }

    /// Verifies a header previously produced by [`header_value`] against a
    /// body. Used by the backend side and by tests; tolerant of nothing.
    ///
    /// [`header_value`]: PayloadSigner::header_value
    pub fn verify_header(&self, header: &str, body: &[u8]) -> bool {
        let mut timestamp = None;
        let mut signature = None;
        for part in header.split(',') {
            match part.split_once('=') {
                Some(("t", value)) => timestamp = value.parse::<i64>().ok(),
                Some(("v1", value)) => signature = Some(value),
                _ => return false,
            }
        }
        match (timestamp, signature) {
            (Some(ts), Some(sig)) => constant_time_compare(&self.sign(ts, body), sig),
            _ => false,
        }
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
