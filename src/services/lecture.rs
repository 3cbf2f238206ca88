// src/services/lecture.rs
//
// Neither the curriculum toggle nor chat posting checks that the caller takes
// part in the match; any authenticated user can act on any match id.

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::{AppError, is_foreign_key_violation},
    models::{
        lecture::{ChatMessage, CurriculumItem, LectureRoom, PostChatRequest},
        matching::MatchSummary,
    },
    services::matching::MATCH_SUMMARY_SELECT,
    utils::html::clean_html,
};

pub async fn toggle_curriculum_item(pool: &SqlitePool, item_id: i64, completed: bool) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE curriculum SET completed = ? WHERE id = ?")
        .bind(completed)
        .bind(item_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Curriculum item not found".to_string()));
    }

    Ok(())
}

/// Appends a message to the match's chat log. Returns the new message id.
///
/// Content is stored sanitized for direct HTML rendering: disallowed tags are
/// dropped and bare text is entity-escaped, so `2 < 3` is kept as `2 &lt; 3`.
pub async fn post_chat_message(pool: &SqlitePool, payload: &PostChatRequest) -> Result<i64, AppError> {
    payload.validate()?;

    let content = clean_html(payload.content.trim());
    if content.is_empty() {
        return Err(AppError::BadRequest("Message must not be empty.".to_string()));
    }

    let id = sqlx::query_scalar(
        "INSERT INTO chat_messages (match_id, sender_id, content) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(payload.match_id)
    .bind(payload.sender_id)
    .bind(&content)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            AppError::NotFound("Match or sender not found".to_string())
        } else {
            tracing::error!("Failed to post chat message: {:?}", e);
            AppError::from(e)
        }
    })?;

    Ok(id)
}

/// Every message of the match, oldest first.
pub async fn list_chat_messages(pool: &SqlitePool, match_id: i64) -> Result<Vec<ChatMessage>, AppError> {
    let messages = sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT c.id, c.match_id, c.sender_id, u.name AS sender_name, c.content, c.created_at
        FROM chat_messages c
        JOIN users u ON c.sender_id = u.id
        WHERE c.match_id = ?
        ORDER BY c.created_at ASC, c.id ASC
        "#,
    )
    .bind(match_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

pub async fn list_curriculum(pool: &SqlitePool, match_id: i64) -> Result<Vec<CurriculumItem>, AppError> {
    let items = sqlx::query_as::<_, CurriculumItem>(
        "SELECT id, match_id, title, completed FROM curriculum WHERE match_id = ? ORDER BY id ASC",
    )
    .bind(match_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Match summary, curriculum and chat log in one view.
pub async fn get_lecture_room(pool: &SqlitePool, match_id: i64) -> Result<LectureRoom, AppError> {
    let sql = format!("{} WHERE m.id = ?", MATCH_SUMMARY_SELECT);
    let summary = sqlx::query_as::<_, MatchSummary>(&sql)
        .bind(match_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Lecture room not found".to_string()))?;

    let curriculum = list_curriculum(pool, match_id).await?;
    let chat_messages = list_chat_messages(pool, match_id).await?;

    Ok(LectureRoom {
        summary,
        curriculum,
        chat_messages,
    })
}
