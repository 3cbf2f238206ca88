// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    extract::ApiJson,
    models::user::{LoginRequest, RegisterRequest},
    services::accounts,
    utils::jwt::sign_jwt,
};

/// Registers a new student or teacher.
///
/// Teachers' subject competencies are stored in the same transaction.
/// Returns 201 Created.
pub async fn register(
    State(pool): State<SqlitePool>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    accounts::register_user(&pool, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Registration completed successfully."
        })),
    ))
}

/// Authenticates a user for the claimed role and returns a JWT token.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.validate().is_err() {
        return Err(AppError::AuthError(accounts::INVALID_CREDENTIALS.to_string()));
    }

    let user = accounts::authenticate(&pool, &payload).await?;

    let token = sign_jwt(
        user.id,
        user.role,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "success": true,
        "user": user,
        "token": token,
        "type": "Bearer"
    })))
}
