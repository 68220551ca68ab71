use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use colorbook_core::ApiResponse;

use super::jwt::generate_admin_token;
use crate::errors::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in_minutes: i64,
}

/// Admin login: verify the configured credential, mint an expiring token.
/// Email and password failures are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let config = &state.config;

    let email_matches = request
        .email
        .trim()
        .eq_ignore_ascii_case(config.admin_email.trim());

    let parsed_hash = PasswordHash::new(&config.admin_password_hash)
        .map_err(|_| AppError::internal("Invalid admin password hash"))?;
    let password_matches = Argon2::default()
        .verify_password(request.password.as_bytes(), &parsed_hash)
        .is_ok();

    if !email_matches || !password_matches {
        return Err(AppError::unauthorized("Invalid email or password"));
    }

    let token = generate_admin_token(
        &config.jwt_secret,
        &config.admin_email,
        config.token_ttl_minutes,
    )
    .map_err(|_| AppError::internal("Failed to issue admin token"))?;

    info!(email = %config.admin_email, "admin login");

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        expires_in_minutes: config.token_ttl_minutes,
    })))
}
