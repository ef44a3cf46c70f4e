//! API service routes

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::warn;

use crate::{
    config::AppConfig,
    error::ApiError,
    middleware::{auth_middleware, envelope_errors},
    state::AppState,
};

pub mod auth;
pub mod content;
pub mod gallery;
pub mod kegiatan;

/// Create the router for the API service
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    let protected_routes = Router::new()
        .route(
            "/api/admin/kegiatan",
            get(kegiatan::list_kegiatan).post(kegiatan::create_kegiatan),
        )
        .route(
            "/api/admin/kegiatan/:id",
            get(kegiatan::get_kegiatan)
                .put(kegiatan::update_kegiatan)
                .delete(kegiatan::delete_kegiatan),
        )
        .route(
            "/api/admin/kegiatan/:id/photos",
            get(gallery::list_photos).post(gallery::create_photo),
        )
        .route("/api/admin/photos/sort-order", put(gallery::update_sort_order))
        .route(
            "/api/admin/photos/:id",
            get(gallery::get_photo)
                .put(gallery::update_photo)
                .delete(gallery::delete_photo),
        )
        .route(
            "/api/admin/banners",
            get(content::list_banners).post(content::create_banner),
        )
        .route(
            "/api/admin/banners/:id",
            get(content::get_banner)
                .put(content::update_banner)
                .delete(content::delete_banner),
        )
        .route(
            "/api/admin/struktur",
            get(content::list_struktur).post(content::create_struktur),
        )
        .route(
            "/api/admin/struktur/:id",
            get(content::get_struktur)
                .put(content::update_struktur)
                .delete(content::delete_struktur),
        )
        .route(
            "/api/admin/pembina",
            get(content::list_pembina).post(content::create_pembina),
        )
        .route(
            "/api/admin/pembina/:id",
            get(content::get_pembina)
                .put(content::update_pembina)
                .delete(content::delete_pembina),
        )
        .route(
            "/api/admin/qrcode",
            get(content::list_qrcodes).post(content::create_qrcode),
        )
        .route(
            "/api/admin/qrcode/:id",
            get(content::get_qrcode)
                .put(content::update_qrcode)
                .delete(content::delete_qrcode),
        )
        .route("/api/admin/qrcode/:id/toggle", put(content::toggle_qrcode))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/admin/login", post(auth::login))
        .route("/api/kegiatan", get(kegiatan::list_kegiatan))
        .route("/api/kegiatan/:id", get(kegiatan::get_kegiatan))
        .route("/api/kegiatan/:id/photos", get(gallery::list_photos))
        .route("/api/banners", get(content::list_banners))
        .route("/api/struktur", get(content::list_struktur))
        .route("/api/pembina", get(content::list_pembina))
        .route("/api/qrcode/enabled", get(content::list_enabled_qrcodes));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(route_not_found)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(middleware::map_response(envelope_errors))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "site-api"
    }))
}
