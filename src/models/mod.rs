//! Data models
//!
//! This module contains all data structures used throughout the Campushub backend:
//! - Database entities (Student, Employee, Blog, Comment)
//! - Full-body request inputs
//! - Declared field schemas and validation

mod blog;
mod comment;
mod employee;
pub mod schema;
mod student;

pub use blog::{Blog, BlogInput, BLOG_FIELDS};
pub use comment::{Comment, CommentInput, COMMENT_FIELDS};
pub use employee::{Employee, EmployeeInput, EMPLOYEE_FIELDS};
pub use schema::{validate, FieldKind, FieldSpec, ValidationErrors};
pub use student::{Student, StudentInput, STUDENT_FIELDS};
