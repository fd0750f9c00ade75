//! Error types for the plugin pipeline.

use thiserror::Error;

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;

/// Error type for plugin operations.
///
/// Delivery outcomes (rejection, retry exhaustion) are not errors; they are
/// carried by [`crate::DeliveryReport`]. This enum covers faults that stop
/// the pipeline before or during a delivery attempt chain.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A required secret is missing from the host-provided store.
    #[error("Missing required secret: {0}")]
    MissingSecret(&'static str),

    /// The configured webhook URL is not an absolute HTTPS URL.
    #[error("Invalid webhook URL: {reason}")]
    InvalidWebhookUrl { reason: String },

    /// A secret override has a value that cannot be parsed.
    #[error("Invalid value for secret '{key}': {reason}")]
    InvalidSecret { key: &'static str, reason: String },

    /// A built payload could not be serialized; the event is dropped before
    /// any network call.
    #[error("Payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
