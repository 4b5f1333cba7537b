//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for the Campushub backend:
//! - Student and Employee endpoints (explicit per-method handlers)
//! - Blog and Comment endpoints (generic resource router)

pub mod common;
pub mod employees;
pub mod error;
pub mod resource;
pub mod students;


use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;

use crate::db::repositories::{
    EmployeeRepository, SqlxBlogRepository, SqlxCommentRepository, StudentRepository,
};

/// Shared application state: one persistence handle per resource, built in
/// `main` and cloned into the routers. No global mutable state.
#[derive(Clone)]
pub struct AppState {
    pub students: Arc<dyn StudentRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub blogs: Arc<SqlxBlogRepository>,
    pub comments: Arc<SqlxCommentRepository>,
}

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router {
    Router::new()
        .nest("/students", students::router().with_state(state.clone()))
        .nest("/employees", employees::router().with_state(state.clone()))
        .nest("/blogs", resource::router(state.blogs.clone()))
        .nest("/comments", resource::router(state.comments))
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    build_api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
