//! Scheduled course sessions and their enrollment rosters.
//!
//! # Invariants
//! - The canonical roster is upper-cased, deduplicated and sorted ascending.
//! - `start_date` is passed through as text without calendar validation.

use super::{decode_record, normalize_id, Record, RecordError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A scheduled occurrence of a course with a bounded roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    /// References `Course::code`, compared case-insensitively.
    pub course_code: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub location: String,
    /// Maximum number of enrolled participants.
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub enrolled: Vec<String>,
}

impl Session {
    /// Creates a session with an empty roster.
    pub fn new(
        session_id: impl Into<String>,
        course_code: impl Into<String>,
        start_date: impl Into<String>,
        instructor: impl Into<String>,
        location: impl Into<String>,
        capacity: u32,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            course_code: course_code.into(),
            start_date: start_date.into(),
            instructor: instructor.into(),
            location: location.into(),
            capacity,
            enrolled: Vec::new(),
        }
    }

    /// Replaces the roster, e.g. for seed imports.
    pub fn with_enrolled<I, S>(mut self, enrolled: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enrolled = enrolled.into_iter().map(Into::into).collect();
        self
    }

    /// Returns whether `employee_id` is on the roster, ignoring case.
    pub fn is_enrolled(&self, employee_id: &str) -> bool {
        let wanted = normalize_id(employee_id);
        self.enrolled.iter().any(|id| normalize_id(id) == wanted)
    }

    /// Returns whether the roster has reached `capacity`.
    pub fn is_full(&self) -> bool {
        self.enrolled.len() >= self.capacity as usize
    }
}

/// Upper-cases, deduplicates and sorts a roster.
pub fn canonical_roster(enrolled: &[String]) -> Vec<String> {
    let mut roster: Vec<String> = enrolled.iter().map(|id| normalize_id(id)).collect();
    roster.sort();
    roster.dedup();
    roster
}

impl Record for Session {
    const KIND: &'static str = "session";

    fn canonicalized(&self) -> Self {
        Self {
            session_id: normalize_id(&self.session_id),
            course_code: normalize_id(&self.course_code),
            enrolled: canonical_roster(&self.enrolled),
            ..self.clone()
        }
    }

    fn to_record(&self) -> Value {
        json!({
            "session_id": normalize_id(&self.session_id),
            "course_code": normalize_id(&self.course_code),
            "start_date": self.start_date,
            "instructor": self.instructor,
            "location": self.location,
            "capacity": self.capacity,
            "enrolled": canonical_roster(&self.enrolled),
        })
    }

    fn from_record(value: &Value) -> Result<Self, RecordError> {
        decode_record(Self::KIND, &["session_id", "course_code"], value)
    }
}
