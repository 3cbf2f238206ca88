// tests/common/mod.rs
#![allow(dead_code)]

use serde_json::{Value, json};
use tutor_match::{config::Config, db, routes, state::AppState};

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

/// Spawns the app on a random port over a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to create in-memory database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        admin_username: None,
        admin_password: None,
    };

    let app = routes::create_router(AppState { pool, config });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
    }
}

/// Short unique username (validation caps usernames at 50 chars).
pub fn unique_name(prefix: &str) -> String {
    format!("{}_{}", prefix, &uuid::Uuid::new_v4().to_string()[..8])
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.address, path)
    }

    pub async fn subject_id(&self, name: &str) -> i64 {
        let body: Value = self
            .client
            .get(self.url("/subjects"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        body["subjects"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["name"] == name)
            .and_then(|s| s["id"].as_i64())
            .expect("seeded subject")
    }

    pub async fn register(&self, username: &str, password: &str, role: &str, subjects: &[i64]) -> reqwest::Response {
        self.client
            .post(self.url("/register"))
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": password,
                "name": username,
                "userType": role,
                "phoneNumber": "010-0000-0000",
                "subjects": subjects,
                "career": if role == "teacher" { "5 years of tutoring" } else { "" },
                "availableTime": "weekends"
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, username: &str, password: &str, role: &str) -> reqwest::Response {
        self.client
            .post(self.url("/login"))
            .json(&json!({
                "username": username,
                "password": password,
                "userType": role
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Registers and logs in; returns (user id, bearer token).
    pub async fn sign_up(&self, username: &str, password: &str, role: &str, subjects: &[i64]) -> (i64, String) {
        let response = self.register(username, password, role, subjects).await;
        assert_eq!(response.status().as_u16(), 201);

        let body: Value = self.login(username, password, role).await.json().await.unwrap();
        let id = body["user"]["id"].as_i64().expect("user id");
        let token = body["token"].as_str().expect("token").to_string();
        (id, token)
    }

    pub async fn get(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put(&self, path: &str, token: &str, body: Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
