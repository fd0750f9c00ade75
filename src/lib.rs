//! # OneRoom Canvas Plugin
//!
//! Webhook forwarder for Canvas appointment lifecycle events:
//! - filters events to the TEST-OneRoomHealth note type
//! - normalizes appointment, patient and provider data into a stable JSON
//!   payload
//! - delivers the payload to the OneRoom backend over HTTPS with bearer
//!   auth, a bounded timeout, and local retry with exponential backoff
//!
//! Delivery is best-effort per event: there is no persistent queue and no
//! durable outbox. Nothing ever raises past the router entry points into
//! the host's event-processing path.
//!
//! ## Example
//!
//! ```rust,ignore
//! use oneroom_canvas_plugin::{AppointmentEvent, EventRouter};
//!
//! let router = EventRouter::from_secrets(&secrets);
//! let outcome = router.on_booked(&event).await;
//! ```

mod config;
mod dispatch;
mod error;
mod event;
mod filter;
mod model;
mod payload;
mod retry;
mod router;
mod signature;

pub use config::{
    API_KEY_KEY, MAX_RETRIES_KEY, PluginConfig, SIGNING_SECRET_KEY, TIMEOUT_SECS_KEY,
    WEBHOOK_URL_KEY,
};
pub use dispatch::{DeliveryReport, DeliveryResult, WebhookDispatcher};
pub use error::{PluginError, PluginResult};
pub use event::{AppointmentEvent, EventKind};
pub use filter::{NOTE_TYPE_CODE, NOTE_TYPE_DISPLAY, NOTE_TYPE_SYSTEM, NoteTypeFilter};
pub use model::{Appointment, EventContext, NoteType, Patient, Provider};
pub use payload::{
    AppointmentSection, ContextPatient, ContextSection, PAYLOAD_SOURCE, PatientSection,
    ProviderSection, WebhookPayload, build_payload,
};
pub use retry::{ExponentialBackoff, RetryPolicy};
pub use router::{EventRouter, Outcome};
pub use signature::PayloadSigner;
