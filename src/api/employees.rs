//! Employee API endpoints
//!
//! Explicit per-method handlers over the employee repository.

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
use crate::models::{EmployeeInput, EMPLOYEE_FIELDS};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/{id}",
            get(get_employee)
                .put(replace_employee)
                .delete(delete_employee),
        )
        .route(
            "/{id}/",
            get(get_employee)
                .put(replace_employee)
                .delete(delete_employee),
        )
}

async fn list_employees(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let employees = state.employees.list().await?;
    Ok(Json(employees))
}

async fn create_employee(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let input: EmployeeInput = decode_input(EMPLOYEE_FIELDS, parse_body(&body)?)?;
    let employee = state.employees.create(input).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    match state.employees.get_by_id(id).await? {
        Some(employee) => Ok(Json(employee)),
        None => Err(ApiError::NotFound),
    }
}

async fn replace_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    // Resolve before touching the body: a missing key is 404 no matter
    // what was sent
    if state.employees.get_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let input: EmployeeInput = decode_input(EMPLOYEE_FIELDS, parse_body(&body)?)?;
    let employee = state.employees.replace(id, input).await?;
    Ok(Json(employee))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.employees.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
