// src/handlers/requests.rs

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    extract::{ApiJson, ApiPath},
    models::request::{ApplyRequest, CreateTutoringRequest},
    services::matching,
    utils::jwt::Claims,
};

/// Opens a tutoring request. 409 if the student already has a pending one.
pub async fn create_request(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<CreateTutoringRequest>,
) -> Result<impl IntoResponse, AppError> {
    claims.ensure_acting_as(payload.student_id)?;

    let request = matching::create_request(&pool, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Tutoring request submitted.",
            "requestId": request.id
        })),
    ))
}

/// The student's pending request with its applicants, or `null`.
pub async fn get_student_request(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    ApiPath(student_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    claims.ensure_acting_as(student_id)?;

    let request = matching::list_applicants_for_student(&pool, student_id).await?;
    Ok(Json(json!({ "success": true, "request": request })))
}

/// Open requests the teacher is eligible for and has not applied to.
pub async fn list_teacher_requests(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    ApiPath(teacher_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    claims.ensure_acting_as(teacher_id)?;

    let requests = matching::list_open_requests_for_teacher(&pool, teacher_id).await?;
    Ok(Json(json!({ "success": true, "requests": requests })))
}

pub async fn apply(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<ApplyRequest>,
) -> Result<impl IntoResponse, AppError> {
    claims.ensure_acting_as(payload.teacher_id)?;

    matching::apply_to_request(&pool, payload.request_id, payload.teacher_id).await?;
    Ok(Json(json!({ "success": true, "message": "Application submitted." })))
}
