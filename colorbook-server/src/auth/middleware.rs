use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use super::jwt::validate_token;
use crate::errors::AppError;
use crate::AppState;

/// Identity attached to the request once the bearer token checks out.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub subject: String,
}

/// Guard for the admin routes: a valid, unexpired admin token is required;
/// everything else is a 401 with no further detail.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&request)?;
    let claims = validate_token(&state.config.jwt_secret, &token)
        .map_err(|_| AppError::unauthorized("Admin permission required"))?;

    request.extensions_mut().insert(AdminIdentity {
        subject: claims.sub,
    });
    Ok(next.run(request).await)
}

fn extract_bearer_token(request: &Request) -> Result<String, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Admin permission required"))?;

    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::unauthorized("Admin permission required"));
    }

    Ok(auth_header[7..].to_string())
}
