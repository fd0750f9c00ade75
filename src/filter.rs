//! Note-type admission filter.
//!
//! The sole admission-control point of the pipeline: any event failing this
//! check is dropped before data extraction or network work, so irrelevant
//! patient data never leaves the host.

use crate::model::Appointment;

/// Note-type code all forwarded appointments must carry.
pub const NOTE_TYPE_CODE: &str = "TEST-ORH";
/// Note-type display value all forwarded appointments must carry.
pub const NOTE_TYPE_DISPLAY: &str = "TEST-OneRoomHealth";
/// Note-type system identifier all forwarded appointments must carry.
pub const NOTE_TYPE_SYSTEM: &str = "TEST-ORH";

/// Pure predicate over an appointment's note-type triple.
#[derive(Debug, Clone)]
pub struct NoteTypeFilter {
    pub code: String,
    pub display: String,
    pub system: String,
}

impl Default for NoteTypeFilter {
    fn default() -> Self {
        Self::new(NOTE_TYPE_CODE, NOTE_TYPE_DISPLAY, NOTE_TYPE_SYSTEM)
    }
}

impl NoteTypeFilter {
    /// Creates a filter for a specific note-type triple.
    pub fn new(
        code: impl Into<String>,
        display: impl Into<String>,
        system: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            display: display.into(),
            system: system.into(),
        }
    }

    /// True iff code, display and system all equal the configured values,
    /// exactly and case-sensitively. Any absent component never matches.
    pub fn matches(&self, appointment: &Appointment) -> bool {
        let note_type = &appointment.note_type;
        note_type.code.as_deref() == Some(self.code.as_str())
            && note_type.display.as_deref() == Some(self.display.as_str())
            && note_type.system.as_deref() == Some(self.system.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NoteType;

    fn appointment_with(note_type: NoteType) -> Appointment {
        Appointment {
            note_type,
            ..Default::default()
        }
    }

    #[test]
    fn test_exact_triple_matches() {
        let filter = NoteTypeFilter::default();
        let appointment = appointment_with(NoteType::new(
            "TEST-ORH",
            "TEST-OneRoomHealth",
            "TEST-ORH",
        ));
        assert!(filter.matches(&appointment));
    }

    #[test]
    fn test_other_display_does_not_match() {
        let filter = NoteTypeFilter::default();
        let appointment =
            appointment_with(NoteType::new("TEST-ORH", "Office Visit", "TEST-ORH"));
        assert!(!filter.matches(&appointment));
    }

    #[test]
    fn test_case_sensitive() {
        let filter = NoteTypeFilter::default();
        let appointment = appointment_with(NoteType::new(
            "test-orh",
            "TEST-OneRoomHealth",
            "TEST-ORH",
        ));
        assert!(!filter.matches(&appointment));
    }

    #[test]
    fn test_absent_components_do_not_match() {
        let filter = NoteTypeFilter::default();
        assert!(!filter.matches(&appointment_with(NoteType::default())));

        let partial = NoteType {
            code: Some("TEST-ORH".into()),
            display: Some("TEST-OneRoomHealth".into()),
            system: None,
        };
        assert!(!filter.matches(&appointment_with(partial)));
    }
}
