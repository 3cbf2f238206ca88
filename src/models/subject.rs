// src/models/subject.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'subjects' catalog table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Subject {
    pub id: i64,
    pub name: String,
}

/// DTO for adding a catalog entry (admin only).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubjectRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Subject name must be between 1 and 100 characters."
    ))]
    pub name: String,
}
