// src/models/request.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::user::TeacherProfile;

/// Lifecycle of a tutoring request: `Pending --accept--> Matched` (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Matched,
}

/// Represents the 'requests' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutoringRequest {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub level: String,
    pub test_result: String,
    pub status: RequestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for a student opening a new request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTutoringRequest {
    pub student_id: i64,
    pub subject_id: i64,
    #[validate(length(min = 1, max = 50, message = "Level must not be empty."))]
    pub level: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub test_result: String,
}

/// A student's pending request together with the teachers who applied.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequestView {
    pub id: i64,
    pub subject_id: i64,
    pub subject_name: String,
    pub level: String,
    pub test_result: String,
    #[sqlx(skip)]
    pub applicants: Vec<TeacherProfile>,
}

/// A pending request as offered to an eligible teacher.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OpenRequest {
    pub id: i64,
    pub subject_id: i64,
    pub subject_name: String,
    pub student_name: String,
    pub level: String,
    pub test_result: String,
}

/// DTO for a teacher applying to a request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub request_id: i64,
    pub teacher_id: i64,
}
