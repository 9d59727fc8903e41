//! Course catalog entries.

use super::{decode_record, normalize_id, Record, RecordError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A trainable subject, identified by `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub description: String,
}

impl Course {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        level: impl Into<String>,
        duration_days: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            level: level.into(),
            duration_days,
            description: description.into(),
        }
    }
}

impl Record for Course {
    const KIND: &'static str = "course";

    fn canonicalized(&self) -> Self {
        Self {
            code: normalize_id(&self.code),
            ..self.clone()
        }
    }

    fn to_record(&self) -> Value {
        json!({
            "code": normalize_id(&self.code),
            "title": self.title,
            "level": self.level,
            "duration_days": self.duration_days,
            "description": self.description,
        })
    }

    fn from_record(value: &Value) -> Result<Self, RecordError> {
        decode_record(Self::KIND, &["code"], value)
    }
}
