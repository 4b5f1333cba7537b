//! Blog model

use serde::{Deserialize, Serialize};

use super::comment::Comment;
use super::schema::{FieldKind, FieldSpec};

/// Blog record.
///
/// The `comments` array is derived by the persistence layer and is not
/// writable through the blog schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub comments: Vec<Comment>,
}

/// Full-body input for creating or replacing a blog
#[derive(Debug, Clone, Deserialize)]
pub struct BlogInput {
    pub title: String,
    pub body: String,
}

/// Declared schema for blog bodies. `id` and `comments` are server-side.
pub const BLOG_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "title",
        kind: FieldKind::Text,
        required: true,
    },
    FieldSpec {
        name: "body",
        kind: FieldKind::Text,
        required: true,
    },
];
