// src/models/user.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Closed set of account roles. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,

    /// Unique login identity.
    pub username: String,

    /// Unique contact address.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    /// Display name.
    pub name: String,

    #[serde(rename = "userType")]
    pub role: Role,

    pub phone_number: Option<String>,

    /// Teacher-only free text.
    pub career: Option<String>,
    pub available_time: Option<String>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Public teacher profile, shown on the landing page and as a request applicant.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct TeacherProfile {
    pub id: i64,
    pub name: String,
    pub career: Option<String>,
}

/// DTO for creating a new user (Registration).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: String,

    #[validate(email(message = "Email address is not valid."))]
    pub email: String,

    #[validate(length(
        min = 2,
        max = 128,
        message = "Password length must be between 2 and 128 characters."
    ))]
    pub password: String,

    #[validate(length(min = 1, max = 50, message = "Name must not be empty."))]
    pub name: String,

    #[serde(alias = "role")]
    pub user_type: Role,

    #[validate(length(max = 30))]
    pub phone_number: Option<String>,

    /// Subject ids a teacher can teach. Ignored for other roles.
    #[serde(default)]
    pub subjects: Vec<i64>,

    #[validate(length(max = 1000))]
    pub career: Option<String>,

    #[validate(length(max = 200))]
    pub available_time: Option<String>,
}

/// DTO for user login. The claimed role must match the stored one.
///
/// `user_type` stays a plain string so an unknown role is denied like any
/// other bad credential instead of failing deserialization.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    #[serde(alias = "role")]
    pub user_type: String,
}
