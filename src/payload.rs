//! Canonical webhook payload construction.
//!
//! Builds the immutable wire snapshot for one event. Field presence is
//! stable across all event kinds: nested objects are never omitted, only
//! null-filled. Construction is a pure data transformation; missing optional
//! host fields can never make it fail.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::event::EventKind;
use crate::model::{Appointment, EventContext, NoteType};

/// Fixed source tag stamped on every payload.
pub const PAYLOAD_SOURCE: &str = "canvas_plugin";

/// Immutable snapshot sent to the OneRoom backend.
///
/// Constructed fresh per event and discarded once the delivery attempt
/// chain completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub event_type: String,
    /// Construction instant, UTC, millisecond precision, `Z` suffix.
    pub timestamp: String,
    pub source: String,
    /// The configured filter display value, not re-derived from the
    /// appointment.
    pub note_type_filter: String,
    pub appointment: AppointmentSection,
    pub patient: PatientSection,
    pub provider: ProviderSection,
    pub context: ContextSection,
}

/// Appointment section of the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentSection {
    pub id: Option<String>,
    pub start_time: Option<String>,
    pub duration_minutes: Option<i64>,
    pub status: Option<String>,
    pub priority: Option<i64>,
    pub comment: Option<String>,
    pub note: Option<String>,
    pub appointment_type: Option<String>,
    pub note_type: NoteType,
    pub location: Option<String>,
    pub meeting_link: Option<String>,
    pub telehealth_instructions_sent: bool,
    pub entered_in_error: bool,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
}

/// Patient section of the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSection {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub gender: Option<String>,
    /// Derived from date of birth at build time, null when unknown.
    pub age: Option<i32>,
}

/// Provider section of the payload.
///
/// Emitted null-filled when the appointment has no assigned provider,
/// never omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSection {
    pub id: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Context section of the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextSection {
    pub patient: ContextPatient,
    pub additional_context: Value,
}

/// Patient reference inside the context section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextPatient {
    pub id: Option<String>,
}

/// Builds the canonical payload for one event at `now`.
///
/// `filter_display` is the configured note-type filter value; the builder
/// stamps it as-is rather than re-deriving it from appointment data.
pub fn build_payload(
    kind: EventKind,
    appointment: &Appointment,
    context: &EventContext,
    filter_display: &str,
    now: DateTime<Utc>,
) -> WebhookPayload {
    let patient = &appointment.patient;
    let provider = appointment
        .provider
        .as_ref()
        .map(|p| ProviderSection {
            id: p.id.clone(),
            name: p.full_name(),
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
        })
        .unwrap_or_default();

    WebhookPayload {
        event_type: kind.as_str().to_string(),
        timestamp: format_instant(now),
        source: PAYLOAD_SOURCE.to_string(),
        note_type_filter: filter_display.to_string(),
        appointment: AppointmentSection {
            id: appointment.id.clone(),
            start_time: appointment.start_time.as_deref().map(normalize_instant),
            duration_minutes: appointment.duration_minutes,
            status: appointment.status.clone(),
            priority: appointment.priority,
            comment: appointment.comment.clone(),
            note: appointment.note.clone(),
            appointment_type: appointment.appointment_type.clone(),
            note_type: appointment.note_type.clone(),
            location: appointment.location.clone(),
            meeting_link: appointment.meeting_link.clone(),
            telehealth_instructions_sent: appointment.telehealth_instructions_sent,
            entered_in_error: appointment.entered_in_error,
            description: appointment.description.clone(),
            created_at: appointment.created_at.clone(),
            modified_at: appointment.modified_at.clone(),
        },
        patient: PatientSection {
            id: patient.id.clone(),
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            date_of_birth: patient.date_of_birth,
            gender: patient.gender.clone(),
            age: patient.age_on(now.date_naive()),
        },
        provider,
        context: ContextSection {
            patient: ContextPatient {
                id: context.patient_id.clone(),
            },
            additional_context: context.additional.clone(),
        },
    }
}

/// Renders an instant as ISO-8601 with millisecond precision and a literal
/// `Z` suffix.
fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Re-renders a host timestamp string to the millisecond `Z` form when it
/// parses as RFC 3339; passed through unchanged otherwise.
fn normalize_instant(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => format_instant(parsed.with_timezone(&Utc)),
        Err(_) => raw.to_string(),
    }
}
