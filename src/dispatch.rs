//! Authenticated webhook delivery with timeout and bounded retry.
//!
//! The only component with I/O. Exactly one network call per attempt, no
//! local persistence of payloads, and nothing sensitive in the logs: status
//! codes, attempt counts and durations only.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::PluginConfig;
use crate::error::PluginResult;
use crate::payload::WebhookPayload;
use crate::retry::{ExponentialBackoff, RetryPolicy};
use crate::signature::PayloadSigner;

const USER_AGENT: &str = concat!("OneRoom-Canvas-Plugin/", env!("CARGO_PKG_VERSION"));

/// Truncation bound for logged response bodies.
const BODY_LOG_LIMIT: usize = 200;

/// Classification of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    /// 2xx response.
    Ok { status: u16 },
    /// 4xx response; a caller error, retrying would repeat the failure.
    Rejected { status: u16, body: String },
    /// 5xx, connection failure or timeout; eligible for retry.
    Transient { cause: String },
}

/// Final outcome of a delivery attempt chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryReport {
    /// A 2xx response within the retry bound.
    Delivered { status: u16, attempts: u32 },
    /// Backend rejected the request; terminal, zero retries.
    Rejected { status: u16, body: String },
    /// Transient failures exhausted the retry bound.
    Failed { attempts: u32, cause: String },
}

/// Record of one delivery attempt, for logging only. Never persisted.
#[derive(Debug, Clone)]
struct AttemptRecord {
    id: String,
    attempt: u32,
    status: Option<u16>,
    duration_ms: u64,
}

/// Performs the authenticated HTTPS POST for one payload at a time.
pub struct WebhookDispatcher {
    client: reqwest::Client,
    config: PluginConfig,
    retry: ExponentialBackoff,
}

impl WebhookDispatcher {
    /// Creates a dispatcher from validated configuration.
    pub fn new(config: PluginConfig) -> Self {
        let retry = ExponentialBackoff::new(config.backoff_base, config.max_retries);
        Self {
            client: reqwest::Client::new(),
            config,
            retry,
        }
    }

    /// Delivers a payload, retrying transient failures with backoff up to
    /// the configured bound.
    ///
    /// Rejections (4xx) are terminal on the first response. The serialized
    /// body is built once and reused across attempts, so every attempt in a
    /// chain sends identical bytes.
    pub async fn deliver(&self, payload: &WebhookPayload) -> PluginResult<DeliveryReport> {
        let body = serde_json::to_string(payload)?;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match self.attempt(&body, attempt).await {
                DeliveryResult::Ok { status } => {
                    info!(status, attempts = attempt, "webhook delivered");
                    return Ok(DeliveryReport::Delivered {
                        status,
                        attempts: attempt,
                    });
                }
                DeliveryResult::Rejected { status, body } => {
                    warn!(status, "webhook rejected by backend");
                    return Ok(DeliveryReport::Rejected { status, body });
                }
                DeliveryResult::Transient { cause } => match self.retry.next_delay(attempt) {
                    Some(delay) => {
                        warn!(
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            %cause,
                            "transient delivery failure, retrying"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    None => {
                        error!(attempts = attempt, %cause, "webhook delivery failed");
                        return Ok(DeliveryReport::Failed {
                            attempts: attempt,
                            cause,
                        });
                    }
                },
            }
        }
    }

    /// Issues one POST and classifies the response.
    async fn attempt(&self, body: &str, attempt: u32) -> DeliveryResult {
        let started = Instant::now();

        let mut request = self
            .client
            .post(&self.config.webhook_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("User-Agent", USER_AGENT)
            .timeout(self.config.timeout);

        if let Some(secret) = &self.config.signing_secret {
            let signer = PayloadSigner::new(secret);
            let header = signer.header_value(Utc::now().timestamp(), body.as_bytes());
            request = request.header("X-Canvas-Signature", header);
        }

        let response = request.body(body.to_string()).send().await;
        let duration_ms = started.elapsed().as_millis() as u64;

        let (result, status) = match response {
            Ok(resp) => {
                let status = resp.status().as_u16();
                let result = match status {
                    200..=299 => DeliveryResult::Ok { status },
                    400..=499 => {
                        let body = resp.text().await.unwrap_or_default();
                        DeliveryResult::Rejected {
                            status,
                            body: truncate(&body, BODY_LOG_LIMIT),
                        }
                    }
                    _ => DeliveryResult::Transient {
                        cause: format!("HTTP {status}"),
                    },
                };
                (result, Some(status))
            }
            Err(err) if err.is_timeout() => (
                DeliveryResult::Transient {
                    cause: "request timeout".to_string(),
                },
                None,
            ),
            Err(err) if err.is_connect() => (
                DeliveryResult::Transient {
                    cause: "connection failure".to_string(),
                },
                None,
            ),
            Err(err) => (
                DeliveryResult::Transient {
                    cause: format!("request error: {err}"),
                },
                None,
            ),
        };

        let record = AttemptRecord {
            id: Uuid::new_v4().to_string(),
            attempt,
            status,
            duration_ms,
        };
        debug!(
            attempt_id = %record.id,
            attempt = record.attempt,
            status = record.status,
            duration_ms = record.duration_ms,
            "delivery attempt finished"
        );

        result
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        text.to_string()
    } else {
        let mut end = limit;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text[..end].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 200), "short");
        assert_eq!(truncate("abcdef", 3), "abc");
        // Multibyte character straddling the limit is dropped whole.
        assert_eq!(truncate("ab\u{00e9}cd", 3), "ab");
    }
}
