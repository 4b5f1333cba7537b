//! Employee model

use serde::{Deserialize, Serialize};

use super::schema::{FieldKind, FieldSpec};

/// Employee record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub role: String,
}

/// Full-body input for creating or replacing an employee
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    pub role: String,
}

/// Declared schema for employee bodies. `id` is server-assigned and not listed.
pub const EMPLOYEE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        kind: FieldKind::Text,
        required: true,
    },
    FieldSpec {
        name: "role",
        kind: FieldKind::Text,
        required: true,
    },
];
