//! Banner, struktur, pembina and QR code handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult, parse_id},
    models::{
        ApiResponse, Validate,
        content::{
            Banner, BannerInput, MAX_PEMBINA, Pembina, PembinaInput, QrCode, QrCodeInput,
            Struktur, StrukturInput,
        },
    },
    state::AppState,
};

type Created<T> = ApiResult<(StatusCode, ApiResponse<T>)>;

fn created<T>(data: T, entity: &str) -> (StatusCode, ApiResponse<T>) {
    (
        StatusCode::CREATED,
        ApiResponse {
            success: true,
            data: Some(data),
            message: Some(format!("{} created successfully", entity)),
        },
    )
}

fn missing(entity: &str, id: i32) -> ApiError {
    ApiError::NotFound(format!("{} {} not found", entity, id))
}

fn validated<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    let Json(input) = payload?;
    input.validate().map_err(ApiError::Validation)?;
    Ok(input)
}

// Banners

pub async fn list_banners(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Banner>>> {
    Ok(ApiResponse::data(state.banners.get_all().await?))
}

pub async fn get_banner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Banner>> {
    let id = parse_id(&id, "banner")?;
    let banner = state
        .banners
        .find_by_id(id)
        .await?
        .ok_or_else(|| missing("Banner", id))?;
    Ok(ApiResponse::data(banner))
}

pub async fn create_banner(
    State(state): State<AppState>,
    payload: Result<Json<BannerInput>, JsonRejection>,
) -> Created<Banner> {
    let input = validated(payload)?;
    let banner = state.banners.create(&input).await?;
    info!("Created banner {}", banner.id);
    Ok(created(banner, "Banner"))
}

pub async fn update_banner(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BannerInput>, JsonRejection>,
) -> ApiResult<ApiResponse<Banner>> {
    let id = parse_id(&id, "banner")?;
    let input = validated(payload)?;
    let banner = state.banners.update(id, &input).await?;
    Ok(ApiResponse::with_message(banner, "Banner updated successfully"))
}

pub async fn delete_banner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let id = parse_id(&id, "banner")?;
    state.banners.delete(id).await?;
    info!("Deleted banner {}", id);
    Ok(ApiResponse::message("Banner deleted successfully"))
}

// Struktur

pub async fn list_struktur(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<Struktur>>> {
    Ok(ApiResponse::data(state.struktur.get_all().await?))
}

pub async fn get_struktur(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Struktur>> {
    let id = parse_id(&id, "struktur")?;
    let row = state
        .struktur
        .find_by_id(id)
        .await?
        .ok_or_else(|| missing("Struktur", id))?;
    Ok(ApiResponse::data(row))
}

pub async fn create_struktur(
    State(state): State<AppState>,
    payload: Result<Json<StrukturInput>, JsonRejection>,
) -> Created<Struktur> {
    let input = validated(payload)?;
    let row = state.struktur.create(&input).await?;
    info!("Created struktur {}", row.id);
    Ok(created(row, "Struktur"))
}

pub async fn update_struktur(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StrukturInput>, JsonRejection>,
) -> ApiResult<ApiResponse<Struktur>> {
    let id = parse_id(&id, "struktur")?;
    let input = validated(payload)?;
    let row = state.struktur.update(id, &input).await?;
    Ok(ApiResponse::with_message(row, "Struktur updated successfully"))
}

pub async fn delete_struktur(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let id = parse_id(&id, "struktur")?;
    state.struktur.delete(id).await?;
    info!("Deleted struktur {}", id);
    Ok(ApiResponse::message("Struktur deleted successfully"))
}

// Pembina

pub async fn list_pembina(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Pembina>>> {
    Ok(ApiResponse::data(state.pembina.get_all().await?))
}

pub async fn get_pembina(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Pembina>> {
    let id = parse_id(&id, "pembina")?;
    let row = state
        .pembina
        .find_by_id(id)
        .await?
        .ok_or_else(|| missing("Pembina", id))?;
    Ok(ApiResponse::data(row))
}

/// Create an advisor; refused once [`MAX_PEMBINA`] exist
pub async fn create_pembina(
    State(state): State<AppState>,
    payload: Result<Json<PembinaInput>, JsonRejection>,
) -> Created<Pembina> {
    let input = validated(payload)?;

    let Some(row) = state.pembina.create_capped(&input, MAX_PEMBINA).await? else {
        warn!("Pembina limit of {} reached", MAX_PEMBINA);
        return Err(ApiError::LimitReached(format!(
            "maksimal {} pembina sudah tercapai",
            MAX_PEMBINA
        )));
    };

    info!("Created pembina {}", row.id);
    Ok(created(row, "Pembina"))
}

pub async fn update_pembina(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PembinaInput>, JsonRejection>,
) -> ApiResult<ApiResponse<Pembina>> {
    let id = parse_id(&id, "pembina")?;
    let input = validated(payload)?;
    let row = state.pembina.update(id, &input).await?;
    Ok(ApiResponse::with_message(row, "Pembina updated successfully"))
}

pub async fn delete_pembina(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let id = parse_id(&id, "pembina")?;
    state.pembina.delete(id).await?;
    info!("Deleted pembina {}", id);
    Ok(ApiResponse::message("Pembina deleted successfully"))
}

// QR codes

pub async fn list_qrcodes(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<QrCode>>> {
    Ok(ApiResponse::data(state.qrcodes.get_all().await?))
}

/// Public listing: only codes switched on
pub async fn list_enabled_qrcodes(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<QrCode>>> {
    Ok(ApiResponse::data(state.qrcodes.get_enabled().await?))
}

pub async fn get_qrcode(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<QrCode>> {
    let id = parse_id(&id, "QR code")?;
    let row = state
        .qrcodes
        .find_by_id(id)
        .await?
        .ok_or_else(|| missing("QR code", id))?;
    Ok(ApiResponse::data(row))
}

pub async fn create_qrcode(
    State(state): State<AppState>,
    payload: Result<Json<QrCodeInput>, JsonRejection>,
) -> Created<QrCode> {
    let input = validated(payload)?;
    let row = state.qrcodes.create(&input).await?;
    info!("Created QR code {}", row.id);
    Ok(created(row, "QR code"))
}

pub async fn update_qrcode(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<QrCodeInput>, JsonRejection>,
) -> ApiResult<ApiResponse<QrCode>> {
    let id = parse_id(&id, "QR code")?;
    let input = validated(payload)?;
    let row = state.qrcodes.update(id, &input).await?;
    Ok(ApiResponse::with_message(row, "QR code updated successfully"))
}

pub async fn toggle_qrcode(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<QrCode>> {
    let id = parse_id(&id, "QR code")?;
    let row = state.qrcodes.toggle(id).await?;
    info!("QR code {} enabled: {}", id, row.enable);
    Ok(ApiResponse::with_message(row, "QR code status updated"))
}

pub async fn delete_qrcode(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let id = parse_id(&id, "QR code")?;
    state.qrcodes.delete(id).await?;
    info!("Deleted QR code {}", id);
    Ok(ApiResponse::message("QR code deleted successfully"))
}
