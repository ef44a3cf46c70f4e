//! Event photo gallery handlers

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};
use tracing::info;

use crate::{
    error::{ApiResult, parse_id},
    middleware::AuthAdmin,
    models::{
        ApiResponse,
        kegiatan::{KegiatanFoto, PhotoInput, SortOrderRequest},
    },
    state::AppState,
};

/// Photos of one event in display order
pub async fn list_photos(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Vec<KegiatanFoto>>> {
    let kegiatan_id = parse_id(&id, "kegiatan")?;
    let photos = state.gallery.list_by_event(kegiatan_id).await?;
    Ok(ApiResponse::data(photos))
}

pub async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<KegiatanFoto>> {
    let id = parse_id(&id, "photo")?;
    Ok(ApiResponse::data(state.gallery.get(id).await?))
}

pub async fn create_photo(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
    Path(id): Path<String>,
    payload: Result<Json<PhotoInput>, JsonRejection>,
) -> ApiResult<ApiResponse<KegiatanFoto>> {
    let kegiatan_id = parse_id(&id, "kegiatan")?;
    let Json(input) = payload?;

    let photo = state.gallery.create(kegiatan_id, &input).await?;
    info!("Admin {} added photo {}", admin.username, photo.id);

    Ok(ApiResponse::with_message(photo, "Photo created successfully"))
}

pub async fn update_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PhotoInput>, JsonRejection>,
) -> ApiResult<ApiResponse<KegiatanFoto>> {
    let id = parse_id(&id, "photo")?;
    let Json(input) = payload?;

    let photo = state.gallery.update(id, &input).await?;
    Ok(ApiResponse::with_message(photo, "Photo updated successfully"))
}

pub async fn delete_photo(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let id = parse_id(&id, "photo")?;

    state.gallery.delete(id).await?;
    info!("Admin {} deleted photo {}", admin.username, id);

    Ok(ApiResponse::message("Photo deleted successfully"))
}

/// Apply a batch of `{id, sort_order}` pairs atomically
pub async fn update_sort_order(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
    payload: Result<Json<SortOrderRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<()>> {
    let Json(request) = payload?;

    state.gallery.reorder(&request.photos).await?;
    info!(
        "Admin {} reordered {} photos",
        admin.username,
        request.photos.len()
    );

    Ok(ApiResponse::message("Sort order updated successfully"))
}
