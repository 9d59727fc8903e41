//! Persisted training document.
//!
//! # Responsibility
//! - Hold the in-memory snapshot of the three record collections.
//! - Read and rewrite the backing JSON file wholesale.
//!
//! # Invariants
//! - A missing file is an empty store; an unreadable or malformed file is an error.
//! - Records held in a snapshot are always in canonical form.

mod file;

pub use file::{load_document, save_document};

use crate::model::course::Course;
use crate::model::participant::Participant;
use crate::model::session::Session;
use crate::model::{Record, RecordError};
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// The backing file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The backing file exists but is not a valid training document.
    Deserialization {
        path: PathBuf,
        source: DocumentError,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "store i/o failed at `{}`: {source}", path.display())
            }
            Self::Deserialization { path, source } => {
                write!(f, "store at `{}` is malformed: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Deserialization { source, .. } => Some(source),
        }
    }
}

/// Document-level decode failure, before a path is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    Json(String),
    NotAnObject,
    NotAnArray(&'static str),
    Record(RecordError),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(message) => write!(f, "invalid json: {message}"),
            Self::NotAnObject => write!(f, "top-level value must be an object"),
            Self::NotAnArray(field) => write!(f, "field `{field}` must be an array"),
            Self::Record(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Record(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RecordError> for DocumentError {
    fn from(value: RecordError) -> Self {
        Self::Record(value)
    }
}

/// Snapshot of the three collections, in stored order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingDocument {
    pub courses: Vec<Course>,
    pub participants: Vec<Participant>,
    pub sessions: Vec<Session>,
}

impl TrainingDocument {
    /// Decodes a document from raw bytes.
    ///
    /// Absent collections default to empty; present ones must be arrays of
    /// valid records. Every record is canonicalized on the way in.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DocumentError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|err| DocumentError::Json(err.to_string()))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        if !value.is_object() {
            return Err(DocumentError::NotAnObject);
        }
        Ok(Self {
            courses: decode_collection(value, "courses")?,
            participants: decode_collection(value, "participants")?,
            sessions: decode_collection(value, "sessions")?,
        })
    }

    /// Encodes the document with every record in canonical form.
    pub fn to_value(&self) -> Value {
        json!({
            "courses": self.courses.iter().map(Record::to_record).collect::<Vec<_>>(),
            "participants": self.participants.iter().map(Record::to_record).collect::<Vec<_>>(),
            "sessions": self.sessions.iter().map(Record::to_record).collect::<Vec<_>>(),
        })
    }
}

fn decode_collection<T: Record>(
    document: &Value,
    field: &'static str,
) -> Result<Vec<T>, DocumentError> {
    let Some(raw) = document.get(field) else {
        return Ok(Vec::new());
    };
    let items = raw.as_array().ok_or(DocumentError::NotAnArray(field))?;
    items
        .iter()
        .map(|item| {
            T::from_record(item)
                .map(|record| record.canonicalized())
                .map_err(DocumentError::from)
        })
        .collect()
}
