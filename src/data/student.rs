use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_GRADE: i32 = 1;
pub const MAX_GRADE: i32 = 6;

/// A stored student. The `student_number` is the natural key; `id` is opaque and never reused.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: Uuid,
    pub student_number: String,
    pub name: String,
    pub email: String,
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Missing string fields decode as empty so they are reported as missing, not as malformed bodies.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct CreateStudentForm {
    pub student_number: String,
    pub name: String,
    pub email: String,
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<i32>,
}

/// Partial update. `None` leaves the field alone, `Some("")` on a required field is rejected.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct UpdateStudentForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<i32>,
}

impl UpdateStudentForm {
    pub const fn is_empty(&self) -> bool {
        self.student_number.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.class.is_none()
            && self.grade.is_none()
    }
}
