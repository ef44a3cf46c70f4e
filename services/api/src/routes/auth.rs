//! Admin login

use ::auth::{
    models::{LoginRequest, LoginResponse},
    validation::validate_login,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    error::{ApiError, ApiResult},
    models::ApiResponse,
    state::AppState,
};

/// Exchange a username/password pair for an access token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<LoginResponse>> {
    let Json(request) = payload.map_err(|_| ApiError::Validation("Invalid JSON".to_string()))?;
    validate_login(&request.username, &request.password).map_err(ApiError::Validation)?;

    let response = state
        .auth
        .authenticate(&request.username, &request.password)
        .await?;

    Ok(ApiResponse::with_message(response, "Login successful"))
}
