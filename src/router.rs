//! Entry points invoked by the host, one per appointment event kind.
//!
//! The router is the isolation boundary: every internal fault is converted
//! to a host-visible [`Outcome`] plus log entries. Nothing raises past this
//! point into the host's event-processing path.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, error, info};

use crate::config::PluginConfig;
use crate::dispatch::{DeliveryReport, WebhookDispatcher};
use crate::event::{AppointmentEvent, EventKind};
use crate::filter::NoteTypeFilter;
use crate::payload::build_payload;

/// Host-visible outcome of processing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Payload accepted by the backend.
    Delivered,
    /// Event outside the configured note type; nothing was sent.
    Ignored,
    /// Delivery was due but did not succeed (configuration error, build
    /// fault, backend rejection, or retry exhaustion).
    Failed,
}

/// Composes filter, payload builder and dispatcher for host events.
///
/// Stateless across events: each entry-point call owns its data and runs
/// independently of any concurrent call.
pub struct EventRouter {
    filter: NoteTypeFilter,
    dispatcher: Option<WebhookDispatcher>,
}

impl EventRouter {
    /// Creates a router from validated configuration.
    pub fn new(config: PluginConfig) -> Self {
        Self {
            filter: NoteTypeFilter::default(),
            dispatcher: Some(WebhookDispatcher::new(config)),
        }
    }

    /// Builds a router from the host secret store.
    ///
    /// A missing or invalid configuration still yields a router; every
    /// matching event then resolves to [`Outcome::Failed`] with a
    /// configuration-error log, per the fire-and-forget contract.
    pub fn from_secrets(secrets: &HashMap<String, String>) -> Self {
        match PluginConfig::from_secrets(secrets) {
            Ok(config) => Self::new(config),
            Err(err) => {
                error!(error = %err, "webhook configuration incomplete; events will not be delivered");
                Self {
                    filter: NoteTypeFilter::default(),
                    dispatcher: None,
                }
            }
        }
    }

    /// Replaces the note-type filter.
    pub fn with_filter(mut self, filter: NoteTypeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Entry point for appointment-created events.
    pub async fn on_created(&self, event: &AppointmentEvent) -> Outcome {
        self.handle(EventKind::Created, event).await
    }

    /// Entry point for appointment-updated events.
    pub async fn on_updated(&self, event: &AppointmentEvent) -> Outcome {
        self.handle(EventKind::Updated, event).await
    }

    /// Entry point for appointment-booked events.
    pub async fn on_booked(&self, event: &AppointmentEvent) -> Outcome {
        self.handle(EventKind::Booked, event).await
    }

    /// Entry point for appointment-cancelled events.
    pub async fn on_cancelled(&self, event: &AppointmentEvent) -> Outcome {
        self.handle(EventKind::Cancelled, event).await
    }

    /// Entry point for appointment-rescheduled events.
    pub async fn on_rescheduled(&self, event: &AppointmentEvent) -> Outcome {
        self.handle(EventKind::Rescheduled, event).await
    }

    async fn handle(&self, kind: EventKind, event: &AppointmentEvent) -> Outcome {
        if !self.filter.matches(&event.appointment) {
            debug!(kind = %kind, "skipping appointment outside the configured note type");
            return Outcome::Ignored;
        }

        let Some(dispatcher) = &self.dispatcher else {
            error!(kind = %kind, "dropping event: webhook configuration missing");
            return Outcome::Failed;
        };

        let payload = build_payload(
            kind,
            &event.appointment,
            &event.context,
            &self.filter.display,
            Utc::now(),
        );

        match dispatcher.deliver(&payload).await {
            Ok(DeliveryReport::Delivered { status, attempts }) => {
                info!(kind = %kind, status, attempts, "appointment event forwarded");
                Outcome::Delivered
            }
            Ok(DeliveryReport::Rejected { status, .. }) => {
                error!(kind = %kind, status, "backend rejected appointment event");
                Outcome::Failed
            }
            Ok(DeliveryReport::Failed { attempts, cause }) => {
                error!(kind = %kind, attempts, %cause, "appointment event delivery failed");
                Outcome::Failed
            }
            Err(err) => {
                error!(kind = %kind, error = %err, "internal fault while forwarding appointment event");
                Outcome::Failed
            }
        }
    }
}
