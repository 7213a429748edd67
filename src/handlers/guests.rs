//! HTTP handlers for guest CRUD.

use crate::error::AppError;
use crate::model::{Guest, GuestInput};
use crate::service::GuestService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct DeletedBody {
    pub message: &'static str,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Guest>>, AppError> {
    Ok(Json(GuestService::list(state.db.as_ref()).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Guest>, AppError> {
    Ok(Json(GuestService::get(state.db.as_ref(), id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<GuestInput>,
) -> Result<(StatusCode, Json<Guest>), AppError> {
    let guest = GuestService::create(state.db.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(guest)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<GuestInput>,
) -> Result<Json<Guest>, AppError> {
    Ok(Json(GuestService::update(state.db.as_ref(), id, input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeletedBody>, AppError> {
    GuestService::delete(state.db.as_ref(), id).await?;
    Ok(Json(DeletedBody {
        message: "Guest deleted successfully",
    }))
}
