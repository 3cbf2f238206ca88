// src/handlers/matches.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    extract::{ApiJson, ApiPath},
    models::matching::AcceptMatchRequest,
    services::matching,
    utils::jwt::Claims,
};

/// Student accepts one applicant; the request becomes matched.
pub async fn accept_match(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<AcceptMatchRequest>,
) -> Result<impl IntoResponse, AppError> {
    claims.ensure_acting_as(payload.student_id)?;

    let matched = matching::accept_match(
        &pool,
        payload.request_id,
        payload.student_id,
        payload.teacher_id,
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Match completed successfully!",
        "matchId": matched.id
    })))
}

pub async fn get_user_match(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    claims.ensure_acting_as(user_id)?;

    let summary = matching::current_match_for_user(&pool, user_id).await?;
    Ok(Json(json!({ "success": true, "match": summary })))
}
