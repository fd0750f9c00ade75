//! Appointment lifecycle events delivered by the host.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Appointment, EventContext};

/// Appointment lifecycle kinds this plugin responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Created,
    Updated,
    Booked,
    Cancelled,
    Rescheduled,
}

impl EventKind {
    /// All supported kinds, one per router entry point.
    pub const ALL: [EventKind; 5] = [
        EventKind::Created,
        EventKind::Updated,
        EventKind::Booked,
        EventKind::Cancelled,
        EventKind::Rescheduled,
    ];

    /// Wire string for this kind (e.g. `appointment.booked`).
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Created => "appointment.created",
            EventKind::Updated => "appointment.updated",
            EventKind::Booked => "appointment.booked",
            EventKind::Cancelled => "appointment.cancelled",
            EventKind::Rescheduled => "appointment.rescheduled",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An appointment event as handed over by the host.
///
/// The kind is implied by the router entry point the host invokes; the event
/// itself carries the appointment snapshot and the opaque host context.
/// Read-only input, never persisted, owned by one pipeline run.
#[derive(Debug, Clone)]
pub struct AppointmentEvent {
    /// The appointment the event refers to.
    pub appointment: Appointment,
    /// Opaque host context attached to the event.
    pub context: EventContext,
}

impl AppointmentEvent {
    /// Creates an event from host data.
    pub fn new(appointment: Appointment, context: EventContext) -> Self {
        Self {
            appointment,
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_strings() {
        assert_eq!(EventKind::Created.as_str(), "appointment.created");
        assert_eq!(EventKind::Booked.to_string(), "appointment.booked");
        assert_eq!(EventKind::ALL.len(), 5);
    }
}
