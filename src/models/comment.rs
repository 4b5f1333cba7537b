//! Comment model

use serde::{Deserialize, Serialize};

use super::schema::{FieldKind, FieldSpec};

/// Comment record, associated to a blog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub blog_id: i64,
    pub body: String,
}

/// Full-body input for creating or replacing a comment
#[derive(Debug, Clone, Deserialize)]
pub struct CommentInput {
    pub blog_id: i64,
    pub body: String,
}

/// Declared schema for comment bodies. Referential validity of `blog_id`
/// is left to the store's foreign key constraint.
pub const COMMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "blog_id",
        kind: FieldKind::Integer,
        required: true,
    },
    FieldSpec {
        name: "body",
        kind: FieldKind::Text,
        required: true,
    },
];
