use sqlx::SqlitePool;

use crate::{
    db,
    models::user::{RegisterRequest, Role},
    services::accounts,
};

pub async fn pool() -> SqlitePool {
    db::connect_in_memory().await.expect("in-memory database")
}

pub async fn subject_id(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM subjects WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("seeded subject")
}

pub fn registration(username: &str, password: &str, role: Role, subjects: Vec<i64>) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: password.to_string(),
        name: username.to_string(),
        user_type: role,
        phone_number: None,
        subjects,
        career: (role == Role::Teacher).then(|| format!("{} teaches", username)),
        available_time: None,
    }
}

pub async fn student(pool: &SqlitePool, username: &str) -> i64 {
    accounts::register_user(pool, &registration(username, "p1", Role::Student, vec![]))
        .await
        .expect("register student")
}

pub async fn teacher(pool: &SqlitePool, username: &str, subjects: Vec<i64>) -> i64 {
    accounts::register_user(pool, &registration(username, "p2", Role::Teacher, subjects))
        .await
        .expect("register teacher")
}
