//! Plugin configuration loaded from the host secret store.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{PluginError, PluginResult};

/// Secret key holding the OneRoom backend webhook URL.
pub const WEBHOOK_URL_KEY: &str = "WEBHOOK_URL";
/// Secret key holding the bearer token for the backend.
pub const API_KEY_KEY: &str = "API_KEY";
/// Optional secret key enabling HMAC request signing.
pub const SIGNING_SECRET_KEY: &str = "CANVAS_WEBHOOK_SECRET";
/// Optional secret key overriding the request timeout (seconds).
pub const TIMEOUT_SECS_KEY: &str = "WEBHOOK_TIMEOUT_SECS";
/// Optional secret key overriding the retry bound.
pub const MAX_RETRIES_KEY: &str = "WEBHOOK_MAX_RETRIES";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Runtime configuration for webhook delivery.
///
/// Passed explicitly into the dispatcher; there is no global configuration
/// state.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Absolute HTTPS URL of the OneRoom backend webhook.
    pub webhook_url: String,
    /// Bearer token sent in the Authorization header.
    pub api_key: String,
    /// HMAC signing secret; signing is skipped when absent.
    pub signing_secret: Option<String>,
    /// Request timeout covering connect and read.
    pub timeout: Duration,
    /// Maximum retry attempts after the initial delivery attempt.
    pub max_retries: u32,
    /// Base delay for exponential backoff between retries.
    pub backoff_base: Duration,
}

impl PluginConfig {
    /// Creates a configuration with conservative defaults for everything
    /// beyond the two required secrets.
    pub fn new(webhook_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            api_key: api_key.into(),
            signing_secret: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }

    /// Loads and validates configuration from the host secret store.
    ///
    /// `WEBHOOK_URL` and `API_KEY` are required; absence is a configuration
    /// error and no delivery may be attempted without them.
    pub fn from_secrets(secrets: &HashMap<String, String>) -> PluginResult<Self> {
        let webhook_url = required(secrets, WEBHOOK_URL_KEY)?;
        let api_key = required(secrets, API_KEY_KEY)?;

        let url = reqwest::Url::parse(&webhook_url)
            .map_err(|e| PluginError::InvalidWebhookUrl { reason: e.to_string() })?;
        if url.scheme() != "https" {
            return Err(PluginError::InvalidWebhookUrl {
                reason: format!("scheme '{}' is not https", url.scheme()),
            });
        }

        let mut config = Self::new(webhook_url, api_key);
        config.signing_secret = optional(secrets, SIGNING_SECRET_KEY);

        if let Some(raw) = optional(secrets, TIMEOUT_SECS_KEY) {
            let secs: u64 = raw.parse().map_err(|_| PluginError::InvalidSecret {
                key: TIMEOUT_SECS_KEY,
                reason: format!("'{raw}' is not a whole number of seconds"),
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = optional(secrets, MAX_RETRIES_KEY) {
            config.max_retries = raw.parse().map_err(|_| PluginError::InvalidSecret {
                key: MAX_RETRIES_KEY,
                reason: format!("'{raw}' is not a non-negative integer"),
            })?;
        }

        Ok(config)
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry bound.
    pub fn max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Sets the backoff base delay.
    pub fn backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Sets the signing secret.
    pub fn signing_secret(mut self, secret: impl Into<String>) -> Self {
        self.signing_secret = Some(secret.into());
        self
    }
}

fn required(secrets: &HashMap<String, String>, key: &'static str) -> PluginResult<String> {
    secrets
        .get(key)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .ok_or(PluginError::MissingSecret(key))
}

fn optional(secrets: &HashMap<String, String>, key: &str) -> Option<String> {
    secrets
        .get(key)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secrets(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_secrets_defaults() {
        let config = PluginConfig::from_secrets(&secrets(&[
            (WEBHOOK_URL_KEY, "https://backend.example.com/webhook/canvas"),
            (API_KEY_KEY, "token-123"),
        ]))
        .unwrap();

        assert_eq!(config.webhook_url, "https://backend.example.com/webhook/canvas");
        assert_eq!(config.api_key, "token-123");
        assert_eq!(config.signing_secret, None);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.backoff_base, Duration::from_secs(1));
    }

    #[test]
    fn test_missing_secrets() {
        let err = PluginConfig::from_secrets(&secrets(&[(API_KEY_KEY, "token")])).unwrap_err();
        assert!(matches!(err, PluginError::MissingSecret(WEBHOOK_URL_KEY)));

        let err = PluginConfig::from_secrets(&secrets(&[
            (WEBHOOK_URL_KEY, "https://backend.example.com/hook"),
            (API_KEY_KEY, "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, PluginError::MissingSecret(API_KEY_KEY)));
    }

    #[test]
    fn test_rejects_non_https_url() {
        let err = PluginConfig::from_secrets(&secrets(&[
            (WEBHOOK_URL_KEY, "http://backend.example.com/hook"),
            (API_KEY_KEY, "token"),
        ]))
        .unwrap_err();
        assert!(matches!(err, PluginError::InvalidWebhookUrl { .. }));

        let err = PluginConfig::from_secrets(&secrets(&[
            (WEBHOOK_URL_KEY, "not a url"),
            (API_KEY_KEY, "token"),
        ]))
        .unwrap_err();
        assert!(matches!(err, PluginError::InvalidWebhookUrl { .. }));
    }

    #[test]
    fn test_overrides() {
        let config = PluginConfig::from_secrets(&secrets(&[
            (WEBHOOK_URL_KEY, "https://backend.example.com/hook"),
            (API_KEY_KEY, "token"),
            (SIGNING_SECRET_KEY, "shh"),
            (TIMEOUT_SECS_KEY, "5"),
            (MAX_RETRIES_KEY, "1"),
        ]))
        .unwrap();

        assert_eq!(config.signing_secret.as_deref(), Some("shh"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 1);
    }

    #[test]
    fn test_invalid_override_value() {
        let err = PluginConfig::from_secrets(&secrets(&[
            (WEBHOOK_URL_KEY, "https://backend.example.com/hook"),
            (API_KEY_KEY, "token"),
            (TIMEOUT_SECS_KEY, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            PluginError::InvalidSecret { key: TIMEOUT_SECS_KEY, .. }
        ));
    }
}
