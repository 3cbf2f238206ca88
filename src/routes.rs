// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, catalog, lecture, matches, requests},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware, student_middleware, teacher_middleware},
};

/// Assembles the main application router.
///
/// * Public routes: registration, login and the read-only catalog.
/// * Everything else requires a bearer token; role-specific groups add a role gate.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://localhost:8080"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let public_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/subjects", get(catalog::list_subjects))
        .route("/teachers", get(catalog::list_teachers));

    let student_routes = Router::new()
        .route("/requests", post(requests::create_request))
        .route("/requests/student/{id}", get(requests::get_student_request))
        .route("/match", post(matches::accept_match))
        .layer(middleware::from_fn(student_middleware));

    let teacher_routes = Router::new()
        .route("/requests/teacher/{id}", get(requests::list_teacher_requests))
        .route("/apply", post(requests::apply))
        .layer(middleware::from_fn(teacher_middleware));

    let admin_routes = Router::new()
        .route("/admin/subjects", post(catalog::create_subject))
        .layer(middleware::from_fn(admin_middleware));

    // Any signed-in user. No check that the caller belongs to the match.
    let member_routes = Router::new()
        .route("/matches/user/{id}", get(matches::get_user_match))
        .route("/lecture/curriculum", put(lecture::update_curriculum))
        .route("/lecture/chat", post(lecture::post_chat))
        .route("/lecture/{match_id}", get(lecture::get_lecture_room))
        .route("/lecture/{match_id}/chat", get(lecture::list_chat));

    // Auth runs first (outermost), then the per-group role gate.
    let protected_routes = member_routes
        .merge(student_routes)
        .merge(teacher_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
