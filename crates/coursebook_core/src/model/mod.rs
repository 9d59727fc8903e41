//! Entity layer for the training catalog.
//!
//! # Responsibility
//! - Define the three record kinds: courses, participants and sessions.
//! - Own the canonical external representation of each record.
//!
//! # Invariants
//! - Identifiers compare case-insensitively and are upper-cased on output.
//! - Conversions are pure; nothing in this module touches storage.

pub mod course;
pub mod participant;
pub mod session;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Returns the canonical form of an identifier.
pub fn normalize_id(id: &str) -> String {
    id.to_uppercase()
}

/// Case-insensitive identifier equality.
pub fn ids_match(left: &str, right: &str) -> bool {
    normalize_id(left) == normalize_id(right)
}

/// Conversion failures between stored mappings and entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Stored value is not a JSON object.
    NotAnObject { kind: &'static str },
    /// A required identifier field is absent.
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
    /// A field is present but has the wrong shape.
    Invalid { kind: &'static str, message: String },
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject { kind } => write!(f, "{kind} record must be an object"),
            Self::MissingField { kind, field } => {
                write!(f, "{kind} record is missing required field `{field}`")
            }
            Self::Invalid { kind, message } => write!(f, "invalid {kind} record: {message}"),
        }
    }
}

impl Error for RecordError {}

/// Canonical mapping contract shared by every entity kind.
pub trait Record: Sized {
    /// Human-readable record kind used in error messages.
    const KIND: &'static str;

    /// Returns a copy with identifiers upper-cased and collections normalized.
    fn canonicalized(&self) -> Self;

    /// Produces the canonical stored mapping with every field present.
    fn to_record(&self) -> Value;

    /// Rebuilds an entity from a stored mapping.
    ///
    /// # Errors
    /// - `MissingField` when an identifier field is absent.
    /// - `Invalid` when a present field has the wrong type.
    fn from_record(value: &Value) -> Result<Self, RecordError>;
}

/// Checks required keys, then lets serde fill defaults for everything else.
pub(crate) fn decode_record<T: DeserializeOwned>(
    kind: &'static str,
    required: &[&'static str],
    value: &Value,
) -> Result<T, RecordError> {
    let object = value.as_object().ok_or(RecordError::NotAnObject { kind })?;
    if let Some(field) = required
        .iter()
        .copied()
        .find(|field| !object.contains_key(*field))
    {
        return Err(RecordError::MissingField { kind, field });
    }
    T::deserialize(value).map_err(|err| RecordError::Invalid {
        kind,
        message: err.to_string(),
    })
}
