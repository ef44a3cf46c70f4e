//! Bearer token middleware guarding every `/api/admin` route, and the
//! response mapper that keeps framework-generated errors in the envelope

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use tracing::warn;

use crate::{error::ApiError, models::ApiResponse, state::AppState};

/// Admin identity taken from a verified token
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub id: i32,
    pub username: String,
}

/// Reject the request unless it carries a valid `Authorization: Bearer` token.
/// Any valid token grants full admin access.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = match req.headers().typed_try_get::<Authorization<Bearer>>() {
        Ok(Some(Authorization(bearer))) => bearer,
        Ok(None) => {
            return Err(ApiError::InvalidToken(
                "Authorization header required".to_string(),
            ));
        }
        Err(_) => {
            warn!("Rejected malformed authorization header");
            return Err(ApiError::InvalidToken(
                "Invalid authorization header format".to_string(),
            ));
        }
    };

    let claims = state.auth.verify_token(bearer.token())?;

    req.extensions_mut().insert(AuthAdmin {
        id: claims.user_id,
        username: claims.username,
    });

    Ok(next.run(req).await)
}

/// Rewrap error responses that did not come from a handler (unknown method,
/// timeout, ...) as a `{success: false, message}` envelope. Responses that
/// already carry a JSON body pass through untouched.
pub async fn envelope_errors(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if is_json {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_TYPE);
    parts.headers.remove(header::CONTENT_LENGTH);

    let message = status.canonical_reason().unwrap_or("Request failed");
    let mut wrapped = (status, ApiResponse::failure(message)).into_response();
    wrapped.headers_mut().extend(parts.headers);
    wrapped
        .headers_mut()
        .entry(header::CONTENT_TYPE)
        .or_insert(HeaderValue::from_static("application/json"));
    wrapped
}
