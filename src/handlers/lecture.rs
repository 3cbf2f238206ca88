// src/handlers/lecture.rs

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
    models::lecture::{PostChatRequest, UpdateCurriculumRequest},
    services::lecture,
    utils::jwt::Claims,
};

/// Lecture room: match info, curriculum checklist and chat log.
pub async fn get_lecture_room(
    State(pool): State<SqlitePool>,
    ApiPath(match_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let room = lecture::get_lecture_room(&pool, match_id).await?;
    Ok(Json(json!({
        "success": true,
        "match": room.summary,
        "curriculum": room.curriculum,
        "chatMessages": room.chat_messages
    })))
}

pub async fn update_curriculum(
    State(pool): State<SqlitePool>,
    ApiJson(payload): ApiJson<UpdateCurriculumRequest>,
) -> Result<impl IntoResponse, AppError> {
    lecture::toggle_curriculum_item(&pool, payload.item_id, payload.completed).await?;
    Ok(Json(json!({ "success": true, "message": "Progress updated." })))
}

/// Messages are posted under the caller's own id; membership in the match is not checked.
pub async fn post_chat(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<PostChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    claims.ensure_acting_as(payload.sender_id)?;

    let id = lecture::post_chat_message(&pool, &payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Message sent.", "messageId": id })),
    ))
}

/// Polled by the lecture room page.
pub async fn list_chat(
    State(pool): State<SqlitePool>,
    ApiPath(match_id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let messages = lecture::list_chat_messages(&pool, match_id).await?;
    Ok(Json(json!({ "success": true, "chatMessages": messages })))
}
