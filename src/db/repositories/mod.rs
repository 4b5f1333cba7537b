//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles CRUD operations for a specific resource.
//!
//! Students and employees get dedicated repository traits consumed by their
//! explicit handler modules. Blogs and comments implement the generic
//! [`CrudRepository`] trait and are served through the generic resource
//! router instead.

pub mod blog;
pub mod comment;
pub mod employee;
pub mod student;

pub use blog::SqlxBlogRepository;
pub use comment::SqlxCommentRepository;
pub use employee::{EmployeeRepository, SqlxEmployeeRepository};
pub use student::{SqlxStudentRepository, StudentRepository};

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::FieldSpec;

/// Generic persistence capability set: list-all, get-by-key, create,
/// replace, delete-by-key. One implementation per resource type served
/// through the generic router.
#[async_trait]
pub trait CrudRepository: Send + Sync + 'static {
    /// Stored record, in its external representation
    type Record: Serialize + Send + Sync;
    /// Validated full-body input
    type Input: DeserializeOwned + Send;

    /// Declared schema request bodies are validated against
    fn fields(&self) -> &'static [FieldSpec];

    /// All records, ordered by primary key
    async fn list(&self) -> Result<Vec<Self::Record>>;

    /// Get a record by primary key
    async fn get_by_id(&self, id: i64) -> Result<Option<Self::Record>>;

    /// Persist a new record
    async fn create(&self, input: Self::Input) -> Result<Self::Record>;

    /// Fully replace an existing record
    async fn replace(&self, id: i64, input: Self::Input) -> Result<Self::Record>;

    /// Delete a record; returns false when no row matched
    async fn delete(&self, id: i64) -> Result<bool>;
}
