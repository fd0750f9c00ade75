//! Value structs for host appointment data.
//!
//! The host hands over dynamically shaped records; these structs re-model
//! them as explicit immutable values with every optional field enumerated,
//! so the rest of the pipeline never reaches into untyped data.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Note-type classification on an appointment (code/display/system triple).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteType {
    pub code: Option<String>,
    pub display: Option<String>,
    pub system: Option<String>,
}

impl NoteType {
    /// Creates a fully populated note type.
    pub fn new(
        code: impl Into<String>,
        display: impl Into<String>,
        system: impl Into<String>,
    ) -> Self {
        Self {
            code: Some(code.into()),
            display: Some(display.into()),
            system: Some(system.into()),
        }
    }
}

/// Scheduling entity snapshot handed over by the host.
///
/// Timestamps are kept as the host's raw strings; the payload builder
/// re-renders them where the wire contract demands a normalized form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Appointment {
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
    /// Exactly one patient per appointment.
    pub patient: Patient,
    /// Zero or one assigned provider.
    pub provider: Option<Provider>,
}

/// Patient referenced by an appointment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Patient {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
}

impl Patient {
    /// Calendar age in whole years on `today`.
    ///
    /// One year is subtracted when `today`'s month/day precedes the birth
    /// month/day. Returns `None` without a birth date. Recomputed per event,
    /// never stored.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        let dob = self.date_of_birth?;
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        Some(age)
    }
}

/// Provider assigned to an appointment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Provider {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Provider {
    /// Full display name combining first and last name.
    ///
    /// Returns `None` when both parts are absent.
    pub fn full_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(single), None) | (None, Some(single)) => Some(single.to_string()),
            (None, None) => None,
        }
    }
}

/// Opaque host context attached to an event, passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventContext {
    /// Patient id as seen by the host event, when present.
    pub patient_id: Option<String>,
    /// Any additional context the host attached.
    pub additional: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_after_birthday() {
        let patient = Patient {
            date_of_birth: Some(date(1980, 1, 1)),
            ..Default::default()
        };
        assert_eq!(patient.age_on(date(2025, 6, 15)), Some(45));
    }

    #[test]
    fn test_age_before_birthday() {
        let patient = Patient {
            date_of_birth: Some(date(1980, 12, 31)),
            ..Default::default()
        };
        assert_eq!(patient.age_on(date(2025, 1, 1)), Some(44));
    }

    #[test]
    fn test_age_on_birthday() {
        let patient = Patient {
            date_of_birth: Some(date(1980, 3, 10)),
            ..Default::default()
        };
        assert_eq!(patient.age_on(date(2025, 3, 10)), Some(45));
        assert_eq!(patient.age_on(date(2025, 3, 9)), Some(44));
    }

    #[test]
    fn test_age_without_birth_date() {
        assert_eq!(Patient::default().age_on(date(2025, 6, 15)), None);
    }

    #[test]
    fn test_provider_full_name() {
        let provider = Provider {
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            ..Default::default()
        };
        assert_eq!(provider.full_name().as_deref(), Some("Jane Doe"));

        let partial = Provider {
            last_name: Some("Doe".into()),
            ..Default::default()
        };
        assert_eq!(partial.full_name().as_deref(), Some("Doe"));

        assert_eq!(Provider::default().full_name(), None);
    }
}
