//! Event (kegiatan) handlers, shared by the public and admin routes

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult, parse_id},
    middleware::AuthAdmin,
    models::{
        ApiResponse, Validate,
        kegiatan::{Kegiatan, KegiatanInput},
    },
    state::AppState,
};

pub async fn list_kegiatan(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Kegiatan>>> {
    Ok(ApiResponse::data(state.kegiatan.list().await?))
}

pub async fn get_kegiatan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Kegiatan>> {
    let id = parse_id(&id, "kegiatan")?;
    let kegiatan = state
        .kegiatan
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Kegiatan {} not found", id)))?;

    Ok(ApiResponse::data(kegiatan))
}

pub async fn create_kegiatan(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
    payload: Result<Json<KegiatanInput>, JsonRejection>,
) -> ApiResult<(StatusCode, ApiResponse<Kegiatan>)> {
    let Json(input) = payload?;
    input.validate().map_err(ApiError::Validation)?;

    let kegiatan = state.kegiatan.create(&input).await?;
    info!("Admin {} created kegiatan {}", admin.username, kegiatan.id);

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(kegiatan, "Kegiatan created successfully"),
    ))
}

pub async fn update_kegiatan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<KegiatanInput>, JsonRejection>,
) -> ApiResult<ApiResponse<Kegiatan>> {
    let id = parse_id(&id, "kegiatan")?;
    let Json(input) = payload?;
    input.validate().map_err(ApiError::Validation)?;

    let kegiatan = state.kegiatan.update(id, &input).await?;
    Ok(ApiResponse::with_message(kegiatan, "Kegiatan updated successfully"))
}

/// Remove the event and every photo under it
pub async fn delete_kegiatan(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let id = parse_id(&id, "kegiatan")?;

    let photos = state.kegiatan.delete(id).await?;
    info!(
        "Admin {} deleted kegiatan {} with {} photos",
        admin.username, id, photos
    );

    Ok(ApiResponse::message("Kegiatan deleted successfully"))
}
