//! Employees eligible for enrollment.

use super::{decode_record, normalize_id, Record, RecordError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub employee_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department: String,
}

impl Participant {
    pub fn new(
        employee_id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            name: name.into(),
            department: department.into(),
        }
    }
}

impl Record for Participant {
    const KIND: &'static str = "participant";

    fn canonicalized(&self) -> Self {
        Self {
            employee_id: normalize_id(&self.employee_id),
            ..self.clone()
        }
    }

    fn to_record(&self) -> Value {
        json!({
            "employee_id": normalize_id(&self.employee_id),
            "name": self.name,
            "department": self.department,
        })
    }

    fn from_record(value: &Value) -> Result<Self, RecordError> {
        decode_record(Self::KIND, &["employee_id"], value)
    }
}
