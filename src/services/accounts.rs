// src/services/accounts.rs

use std::collections::BTreeSet;

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::{AppError, is_foreign_key_violation, is_unique_violation},
    models::{
        subject::Subject,
        user::{LoginRequest, RegisterRequest, Role, TeacherProfile, User},
    },
    utils::{
        hash::{hash_password, verify_password},
        html::clean_optional,
    },
};

/// Single denial for every login failure so callers cannot tell which check failed.
pub const INVALID_CREDENTIALS: &str = "Invalid username, password or user type";

const USER_COLUMNS: &str = "id, username, email, password, name, role, phone_number, career, available_time, created_at";

/// Creates a user and, for teachers, their subject competencies in one transaction.
///
/// Returns the new user id.
pub async fn register_user(pool: &SqlitePool, payload: &RegisterRequest) -> Result<i64, AppError> {
    payload.validate()?;

    if payload.user_type == Role::Admin {
        return Err(AppError::BadRequest(
            "Admin accounts cannot be self-registered".to_string(),
        ));
    }

    let hashed_password = hash_password(&payload.password)?;

    let mut tx = pool.begin().await?;

    let user_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO users (username, email, password, name, role, phone_number, career, available_time)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&payload.username)
    .bind(payload.email.trim().to_lowercase())
    .bind(&hashed_password)
    .bind(&payload.name)
    .bind(payload.user_type)
    .bind(&payload.phone_number)
    .bind(clean_optional(payload.career.as_deref()))
    .bind(clean_optional(payload.available_time.as_deref()))
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Username or email is already in use".to_string())
        } else {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        }
    })?;

    if payload.user_type == Role::Teacher {
        let subjects: BTreeSet<i64> = payload.subjects.iter().copied().collect();
        for subject_id in subjects {
            sqlx::query("INSERT INTO user_subjects (user_id, subject_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(subject_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    if is_foreign_key_violation(&e) {
                        AppError::BadRequest(format!("Unknown subject id {}", subject_id))
                    } else {
                        AppError::from(e)
                    }
                })?;
        }
    }

    tx.commit().await?;

    tracing::info!(user_id, role = %payload.user_type, "User registered");
    Ok(user_id)
}

/// Verifies the credential and the claimed role against the stored account.
pub async fn authenticate(pool: &SqlitePool, payload: &LoginRequest) -> Result<User, AppError> {
    let user = find_by_username(pool, &payload.username)
        .await?
        .ok_or_else(|| AppError::AuthError(INVALID_CREDENTIALS.to_string()))?;

    let is_valid = verify_password(&payload.password, &user.password)?;

    if !is_valid || user.role.as_str() != payload.user_type {
        tracing::warn!(username = %payload.username, "Rejected login attempt");
        return Err(AppError::AuthError(INVALID_CREDENTIALS.to_string()));
    }

    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS);
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Creates the configured admin account if it does not exist yet.
///
/// Returns `true` when a new account was inserted.
pub async fn seed_admin(pool: &SqlitePool, username: &str, password: &str) -> Result<bool, AppError> {
    if find_by_username(pool, username).await?.is_some() {
        return Ok(false);
    }

    let hashed_password = hash_password(password)?;

    sqlx::query(
        "INSERT INTO users (username, email, password, name, role) VALUES (?, ?, ?, ?, 'admin')",
    )
    .bind(username)
    .bind(format!("{}@localhost", username))
    .bind(hashed_password)
    .bind("Administrator")
    .execute(pool)
    .await?;

    Ok(true)
}

pub async fn list_subjects(pool: &SqlitePool) -> Result<Vec<Subject>, AppError> {
    let subjects = sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(subjects)
}

pub async fn create_subject(pool: &SqlitePool, name: &str) -> Result<Subject, AppError> {
    sqlx::query_as::<_, Subject>("INSERT INTO subjects (name) VALUES (?) RETURNING id, name")
        .bind(name.trim())
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!("Subject '{}' already exists", name.trim()))
            } else {
                AppError::from(e)
            }
        })
}

pub async fn list_teachers(pool: &SqlitePool) -> Result<Vec<TeacherProfile>, AppError> {
    let teachers = sqlx::query_as::<_, TeacherProfile>(
        "SELECT id, name, career FROM users WHERE role = 'teacher' ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(teachers)
}
