// src/services/matching.rs

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::{AppError, is_foreign_key_violation, is_unique_violation},
    models::{
        matching::{Match, MatchSummary},
        request::{CreateTutoringRequest, OpenRequest, RequestStatus, StudentRequestView, TutoringRequest},
        user::TeacherProfile,
    },
};

/// Lesson plan every new match starts with.
pub const DEFAULT_CURRICULUM: [&str; 4] = [
    "Week 1: Review level test results and set a study plan",
    "Week 2: Build up core concepts",
    "Week 3: Practice problems by type",
    "Week 4: Advanced problems and error review",
];

/// Match joined with subject and both participants. Callers append the WHERE clause.
pub(crate) const MATCH_SUMMARY_SELECT: &str = r#"
    SELECT
        m.id, m.request_id, r.subject_id, s.name AS subject_name,
        m.student_id, st.name AS student_name,
        m.teacher_id, te.name AS teacher_name
    FROM matches m
    JOIN requests r ON m.request_id = r.id
    JOIN subjects s ON r.subject_id = s.id
    JOIN users st ON m.student_id = st.id
    JOIN users te ON m.teacher_id = te.id
"#;

/// Opens a new pending request for a student.
///
/// At most one pending request per student. The check and the insert are two
/// statements, so two simultaneous calls can both pass the check.
pub async fn create_request(
    pool: &SqlitePool,
    payload: &CreateTutoringRequest,
) -> Result<TutoringRequest, AppError> {
    payload.validate()?;

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM requests WHERE student_id = ? AND status = ?")
            .bind(payload.student_id)
            .bind(RequestStatus::Pending)
            .fetch_optional(pool)
            .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(
            "You already have a pending tutoring request".to_string(),
        ));
    }

    let request = sqlx::query_as::<_, TutoringRequest>(
        r#"
        INSERT INTO requests (student_id, subject_id, level, test_result)
        VALUES (?, ?, ?, ?)
        RETURNING id, student_id, subject_id, level, test_result, status, created_at
        "#,
    )
    .bind(payload.student_id)
    .bind(payload.subject_id)
    .bind(&payload.level)
    .bind(&payload.test_result)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            AppError::BadRequest("Unknown student or subject".to_string())
        } else {
            tracing::error!("Failed to create request: {:?}", e);
            AppError::from(e)
        }
    })?;

    tracing::info!(request_id = request.id, student_id = request.student_id, "Tutoring request opened");
    Ok(request)
}

/// Records a teacher's interest in a request.
///
/// Subject eligibility is not re-checked here; the open-request listing is
/// what keeps teachers to their competencies.
pub async fn apply_to_request(pool: &SqlitePool, request_id: i64, teacher_id: i64) -> Result<(), AppError> {
    sqlx::query("INSERT INTO request_applicants (request_id, teacher_id) VALUES (?, ?)")
        .bind(request_id)
        .bind(teacher_id)
        .execute(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Already applied to this request".to_string())
            } else if is_foreign_key_violation(&e) {
                AppError::NotFound("Request or teacher not found".to_string())
            } else {
                tracing::error!("Failed to apply to request: {:?}", e);
                AppError::from(e)
            }
        })?;

    tracing::info!(request_id, teacher_id, "Teacher applied");
    Ok(())
}

/// Pairs the student with the chosen teacher, closing the request and
/// creating the default curriculum. All writes commit together or not at all.
pub async fn accept_match(
    pool: &SqlitePool,
    request_id: i64,
    student_id: i64,
    teacher_id: i64,
) -> Result<Match, AppError> {
    accept_match_with_plan(pool, request_id, student_id, teacher_id, &DEFAULT_CURRICULUM).await
}

pub(crate) async fn accept_match_with_plan(
    pool: &SqlitePool,
    request_id: i64,
    student_id: i64,
    teacher_id: i64,
    plan: &[&str],
) -> Result<Match, AppError> {
    let mut tx = pool.begin().await?;

    let (owner_id, status): (i64, RequestStatus) =
        sqlx::query_as("SELECT student_id, status FROM requests WHERE id = ?")
            .bind(request_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

    if status != RequestStatus::Pending {
        return Err(AppError::Conflict("Request is already matched".to_string()));
    }
    if owner_id != student_id {
        return Err(AppError::BadRequest(
            "Request does not belong to this student".to_string(),
        ));
    }

    // The teacher must be one of the request's applicants.
    let applied: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM request_applicants WHERE request_id = ? AND teacher_id = ?")
            .bind(request_id)
            .bind(teacher_id)
            .fetch_optional(&mut *tx)
            .await?;
    if applied.is_none() {
        return Err(AppError::BadRequest(
            "Teacher has not applied to this request".to_string(),
        ));
    }

    let matched = sqlx::query_as::<_, Match>(
        r#"
        INSERT INTO matches (request_id, student_id, teacher_id)
        VALUES (?, ?, ?)
        RETURNING id, request_id, student_id, teacher_id, created_at
        "#,
    )
    .bind(request_id)
    .bind(student_id)
    .bind(teacher_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Request is already matched".to_string())
        } else if is_foreign_key_violation(&e) {
            AppError::NotFound("Teacher not found".to_string())
        } else {
            AppError::from(e)
        }
    })?;

    sqlx::query("UPDATE requests SET status = ? WHERE id = ?")
        .bind(RequestStatus::Matched)
        .bind(request_id)
        .execute(&mut *tx)
        .await?;

    for title in plan {
        sqlx::query("INSERT INTO curriculum (match_id, title) VALUES (?, ?)")
            .bind(matched.id)
            .bind(*title)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(match_id = matched.id, request_id, student_id, teacher_id, "Match created");
    Ok(matched)
}

/// Pending requests in the teacher's subjects that the teacher has not applied to yet.
pub async fn list_open_requests_for_teacher(
    pool: &SqlitePool,
    teacher_id: i64,
) -> Result<Vec<OpenRequest>, AppError> {
    let requests = sqlx::query_as::<_, OpenRequest>(
        r#"
        SELECT r.id, r.subject_id, s.name AS subject_name, u.name AS student_name,
               r.level, r.test_result
        FROM requests r
        JOIN users u ON r.student_id = u.id
        JOIN subjects s ON r.subject_id = s.id
        WHERE r.status = 'pending'
          AND r.subject_id IN (SELECT subject_id FROM user_subjects WHERE user_id = ?)
          AND r.id NOT IN (SELECT request_id FROM request_applicants WHERE teacher_id = ?)
        ORDER BY r.id
        "#,
    )
    .bind(teacher_id)
    .bind(teacher_id)
    .fetch_all(pool)
    .await?;

    Ok(requests)
}

/// The student's pending request with the teachers who applied, if any.
pub async fn list_applicants_for_student(
    pool: &SqlitePool,
    student_id: i64,
) -> Result<Option<StudentRequestView>, AppError> {
    let request = sqlx::query_as::<_, StudentRequestView>(
        r#"
        SELECT r.id, r.subject_id, s.name AS subject_name, r.level, r.test_result
        FROM requests r
        JOIN subjects s ON r.subject_id = s.id
        WHERE r.student_id = ? AND r.status = 'pending'
        ORDER BY r.id DESC
        LIMIT 1
        "#,
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await?;

    let Some(mut request) = request else {
        return Ok(None);
    };

    request.applicants = sqlx::query_as::<_, TeacherProfile>(
        r#"
        SELECT u.id, u.name, u.career
        FROM request_applicants ra
        JOIN users u ON ra.teacher_id = u.id
        WHERE ra.request_id = ?
        ORDER BY ra.created_at, u.id
        "#,
    )
    .bind(request.id)
    .fetch_all(pool)
    .await?;

    Ok(Some(request))
}

/// Most recent match the user takes part in, as student or teacher.
pub async fn current_match_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Option<MatchSummary>, AppError> {
    let sql = format!(
        "{} WHERE m.student_id = ? OR m.teacher_id = ? ORDER BY m.id DESC LIMIT 1",
        MATCH_SUMMARY_SELECT
    );
    let summary = sqlx::query_as::<_, MatchSummary>(&sql)
        .bind(user_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(summary)
}
