// src/handlers/catalog.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError, extract::ApiJson, models::subject::CreateSubjectRequest, services::accounts,
};

pub async fn list_subjects(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let subjects = accounts::list_subjects(&pool).await?;
    Ok(Json(json!({ "success": true, "subjects": subjects })))
}

/// Adds a subject to the catalog.
/// Admin only.
pub async fn create_subject(
    State(pool): State<SqlitePool>,
    ApiJson(payload): ApiJson<CreateSubjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let subject = accounts::create_subject(&pool, &payload.name).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "subject": subject })),
    ))
}

/// Public teacher profiles for the landing page.
pub async fn list_teachers(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let teachers = accounts::list_teachers(&pool).await?;
    Ok(Json(json!({ "success": true, "teachers": teachers })))
}
