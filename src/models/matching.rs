// src/models/matching.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'matches' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: i64,
    pub request_id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for a student accepting one applicant.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptMatchRequest {
    pub request_id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
}

/// Match joined with its subject and both participants' names.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub id: i64,
    pub request_id: i64,
    pub subject_id: i64,
    pub subject_name: String,
    pub student_id: i64,
    pub student_name: String,
    pub teacher_id: i64,
    pub teacher_name: String,
}
