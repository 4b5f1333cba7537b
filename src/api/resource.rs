//! Generic resource endpoints
//!
//! One route table serving any repository that implements
//! [`CrudRepository`]: list and create on the collection, retrieve, replace
//! and destroy on the detail path. The repository itself is the router's
//! state, so each instantiation is self-contained.

use std::sync::Arc;

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
use crate::db::repositories::CrudRepository;

pub fn router<R>(repo: Arc<R>) -> Router
where
    R: CrudRepository,
{
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route(
            "/{id}",
            get(retrieve::<R>).put(replace::<R>).delete(destroy::<R>),
        )
        .route(
            "/{id}/",
            get(retrieve::<R>).put(replace::<R>).delete(destroy::<R>),
        )
        .with_state(repo)
}

async fn list<R: CrudRepository>(
    State(repo): State<Arc<R>>,
) -> Result<impl IntoResponse, ApiError> {
    let records = repo.list().await?;
    Ok(Json(records))
}

async fn create<R: CrudRepository>(
    State(repo): State<Arc<R>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let input: R::Input = decode_input(repo.fields(), parse_body(&body)?)?;
    let record = repo.create(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn retrieve<R: CrudRepository>(
    State(repo): State<Arc<R>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    match repo.get_by_id(id).await? {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::NotFound),
    }
}

async fn replace<R: CrudRepository>(
    State(repo): State<Arc<R>>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    // Resolve before touching the body: a missing key is 404 no matter
    // what was sent
    if repo.get_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let input: R::Input = decode_input(repo.fields(), parse_body(&body)?)?;
    let record = repo.replace(id, input).await?;
    Ok(Json(record))
}

async fn destroy<R: CrudRepository>(
    State(repo): State<Arc<R>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if !repo.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
