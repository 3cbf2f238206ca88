// tests/lifecycle_tests.rs

mod common;

use common::{spawn_app, unique_name};
use serde_json::{Value, json};

#[tokio::test]
async fn request_apply_match_and_lecture_room_flow() {
    let app = spawn_app().await;
    let math = app.subject_id("Grade 12 Math").await;

    let (alice, alice_token) = app.sign_up(&unique_name("alice"), "p1", "student", &[]).await;
    let (bob, bob_token) = app.sign_up(&unique_name("bob"), "p2", "teacher", &[math]).await;

    // 1. Alice opens a request
    let response = app
        .post(
            "/requests",
            &alice_token,
            json!({ "studentId": alice, "subjectId": math, "level": "intermediate", "testResult": "7/10" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    // A second pending request is refused
    let response = app
        .post(
            "/requests",
            &alice_token,
            json!({ "studentId": alice, "subjectId": math, "level": "advanced", "testResult": "" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 409);

    // 2. Bob sees it exactly once and applies
    let body: Value = app.get(&format!("/requests/teacher/{}", bob), &bob_token).await.json().await.unwrap();
    let open = body["requests"].as_array().unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0]["subjectName"], "Grade 12 Math");
    let request_id = open[0]["id"].as_i64().unwrap();

    let response = app
        .post("/apply", &bob_token, json!({ "requestId": request_id, "teacherId": bob }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = app.get(&format!("/requests/teacher/{}", bob), &bob_token).await.json().await.unwrap();
    assert!(body["requests"].as_array().unwrap().is_empty());

    // 3. Alice sees Bob among the applicants
    let body: Value = app.get(&format!("/requests/student/{}", alice), &alice_token).await.json().await.unwrap();
    assert_eq!(body["request"]["id"], request_id);
    let applicants = body["request"]["applicants"].as_array().unwrap();
    assert_eq!(applicants.len(), 1);
    assert_eq!(applicants[0]["id"], bob);

    // 4. Alice accepts
    let response = app
        .post(
            "/match",
            &alice_token,
            json!({ "requestId": request_id, "studentId": alice, "teacherId": bob }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let match_id = response.json::<Value>().await.unwrap()["matchId"].as_i64().unwrap();

    let body: Value = app.get(&format!("/requests/student/{}", alice), &alice_token).await.json().await.unwrap();
    assert!(body["request"].is_null());

    let body: Value = app.get(&format!("/matches/user/{}", bob), &bob_token).await.json().await.unwrap();
    assert_eq!(body["match"]["id"], match_id);

    // 5. Lecture room starts with four open curriculum items and no chat
    let room: Value = app.get(&format!("/lecture/{}", match_id), &alice_token).await.json().await.unwrap();
    assert_eq!(room["success"], true);
    assert_eq!(room["match"]["subjectName"], "Grade 12 Math");
    let curriculum = room["curriculum"].as_array().unwrap();
    assert_eq!(curriculum.len(), 4);
    assert!(curriculum.iter().all(|item| item["completed"] == false));
    assert!(room["chatMessages"].as_array().unwrap().is_empty());

    // 6. Toggle progress
    let item_id = curriculum[0]["id"].as_i64().unwrap();
    let response = app
        .put("/lecture/curriculum", &bob_token, json!({ "itemId": item_id, "completed": true }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let room: Value = app.get(&format!("/lecture/{}", match_id), &alice_token).await.json().await.unwrap();
    assert_eq!(room["curriculum"][0]["completed"], true);

    // 7. Chat round trip
    let response = app
        .post(
            "/lecture/chat",
            &alice_token,
            json!({ "matchId": match_id, "senderId": alice, "content": "Hello teacher" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);
    app.post(
        "/lecture/chat",
        &bob_token,
        json!({ "matchId": match_id, "senderId": bob, "content": "Hi Alice" }),
    )
    .await;

    let body: Value = app.get(&format!("/lecture/{}/chat", match_id), &bob_token).await.json().await.unwrap();
    let messages = body["chatMessages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages.iter().filter(|m| m["content"] == "Hello teacher").count(), 1);
    assert_eq!(messages[0]["senderId"], alice);
    assert_eq!(messages[1]["senderId"], bob);

    let response = app
        .post(
            "/lecture/chat",
            &bob_token,
            json!({ "matchId": match_id, "senderId": bob, "content": "" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn matched_request_cannot_be_accepted_again() {
    let app = spawn_app().await;
    let math = app.subject_id("Grade 12 Math").await;
    let (alice, alice_token) = app.sign_up(&unique_name("alice"), "p1", "student", &[]).await;
    let (bob, bob_token) = app.sign_up(&unique_name("bob"), "p2", "teacher", &[math]).await;
    let (carol, carol_token) = app.sign_up(&unique_name("carol"), "p3", "teacher", &[math]).await;

    app.post(
        "/requests",
        &alice_token,
        json!({ "studentId": alice, "subjectId": math, "level": "basic", "testResult": "" }),
    )
    .await;
    let body: Value = app.get(&format!("/requests/teacher/{}", bob), &bob_token).await.json().await.unwrap();
    let request_id = body["requests"][0]["id"].as_i64().unwrap();

    app.post("/apply", &bob_token, json!({ "requestId": request_id, "teacherId": bob })).await;
    app.post("/apply", &carol_token, json!({ "requestId": request_id, "teacherId": carol })).await;

    let first = app
        .post("/match", &alice_token, json!({ "requestId": request_id, "studentId": alice, "teacherId": bob }))
        .await;
    assert_eq!(first.status().as_u16(), 200);

    let second = app
        .post("/match", &alice_token, json!({ "requestId": request_id, "studentId": alice, "teacherId": carol }))
        .await;
    assert_eq!(second.status().as_u16(), 409);

    // Matched requests drop out of every teacher's open list
    let body: Value = app.get(&format!("/requests/teacher/{}", carol), &carol_token).await.json().await.unwrap();
    assert!(body["requests"].as_array().unwrap().is_empty());
}
