//! Student model

use serde::{Deserialize, Serialize};

use super::schema::{FieldKind, FieldSpec};

/// Student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub branch: String,
}

/// Full-body input for creating or replacing a student
#[derive(Debug, Clone, Deserialize)]
pub struct StudentInput {
    pub name: String,
    pub branch: String,
}

/// Declared schema for student bodies. `id` is server-assigned and not listed.
pub const STUDENT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        kind: FieldKind::Text,
        required: true,
    },
    FieldSpec {
        name: "branch",
        kind: FieldKind::Text,
        required: true,
    },
];
