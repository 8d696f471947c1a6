use crate::metrics::{
    track_student_created, track_student_deleted, track_student_rejected, track_student_updated,
};
use crate::modules::students::model::{Student, StudentPayload};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::HeaderName,
    response::IntoResponse,
};
use gradebook_core::{AppError, ErrorResponse, FieldError, ListParams};
use tracing::instrument;
use validator::Validate;

pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

fn student_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        AppError::validation(vec![FieldError::new("id", rejection.body_text())])
    })
}

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Student not found"))
}

#[utoipa::path(
    post,
    path = "/students/",
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Student created successfully", body = Student),
        (status = 400, description = "Student with this data already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, payload))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<StudentPayload>,
) -> Result<Json<Student>, AppError> {
    let existing = StudentService::find_by_identity(
        &state.db,
        &payload.first_name,
        &payload.last_name,
        &payload.class_code,
    )
    .await?;

    if existing.is_some() {
        track_student_rejected("conflict");
        return Err(AppError::conflict(anyhow!(
            "Student with this data already exists"
        )));
    }

    let student = StudentService::create_student(&state.db, payload).await?;
    track_student_created();
    Ok(Json(student))
}

#[utoipa::path(
    get,
    path = "/students/",
    params(ListParams),
    responses(
        (status = 200, description = "Students in insertion order", body = [Student],
            headers(("x-total-count" = i64, description = "Total number of students"))),
        (status = 422, description = "Invalid skip or limit", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, params))]
pub async fn get_students(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params.map_err(|rejection| {
        AppError::validation(vec![FieldError::new("query", rejection.body_text())])
    })?;

    params
        .validate()
        .map_err(|errors| AppError::from_validation(&errors))?;

    let students =
        StudentService::list_students(&state.db, params.skip(), params.limit()).await?;
    let total = StudentService::count_students(&state.db).await?;

    Ok(([(TOTAL_COUNT_HEADER, total.to_string())], Json(students)))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, path))]
pub async fn get_student(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Student>, AppError> {
    let id = student_id(path)?;

    let student = StudentService::get_student(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/students/{id}",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Student updated successfully", body = Student),
        (status = 400, description = "Another student already has this data", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, path, payload))]
pub async fn update_student(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(payload): ValidatedJson<StudentPayload>,
) -> Result<Json<Student>, AppError> {
    let id = student_id(path)?;

    if StudentService::get_student(&state.db, id).await?.is_none() {
        return Err(not_found());
    }

    let student = StudentService::update_student(&state.db, id, payload).await?;
    track_student_updated();
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "The deleted student", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, path))]
pub async fn delete_student(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Student>, AppError> {
    let id = student_id(path)?;

    if StudentService::get_student(&state.db, id).await?.is_none() {
        return Err(not_found());
    }

    let student = StudentService::delete_student(&state.db, id).await?;
    track_student_deleted();
    Ok(Json(student))
}
