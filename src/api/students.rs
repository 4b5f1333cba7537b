//! Student API endpoints
//!
//! Explicit per-method handlers over the student repository.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::common::{decode_input, parse_body};
use super::error::ApiError;
use super::AppState;
use crate::models::{StudentInput, STUDENT_FIELDS};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route(
            "/{id}",
            get(get_student).put(replace_student).delete(delete_student),
        )
        .route(
            "/{id}/",
            get(get_student).put(replace_student).delete(delete_student),
        )
}

async fn list_students(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let students = state.students.list().await?;
    Ok(Json(students))
}

async fn create_student(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let input: StudentInput = decode_input(STUDENT_FIELDS, parse_body(&body)?)?;
    let student = state.students.create(input).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    match state.students.get_by_id(id).await? {
        Some(student) => Ok(Json(student)),
        None => Err(ApiError::NotFound),
    }
}

async fn replace_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    // Resolve before touching the body: a missing key is 404 no matter
    // what was sent
    if state.students.get_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let input: StudentInput = decode_input(STUDENT_FIELDS, parse_body(&body)?)?;
    let student = state.students.replace(id, input).await?;
    Ok(Json(student))
}

async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.students.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
