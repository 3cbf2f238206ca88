// src/models/lecture.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::matching::MatchSummary;

/// One checklist entry of a match's lesson plan.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumItem {
    pub id: i64,
    pub match_id: i64,
    pub title: String,
    pub completed: bool,
}

/// Represents the 'chat_messages' table, joined with the sender's name.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    pub match_id: i64,
    pub sender_id: i64,
    pub sender_name: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCurriculumRequest {
    pub item_id: i64,
    pub completed: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostChatRequest {
    pub match_id: i64,
    pub sender_id: i64,
    #[validate(length(min = 1, message = "Message must not be empty."))]
    pub content: String,
}

/// Everything the lecture room page renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureRoom {
    #[serde(rename = "match")]
    pub summary: MatchSummary,
    pub curriculum: Vec<CurriculumItem>,
    pub chat_messages: Vec<ChatMessage>,
}
