use utoipa::OpenApi;

use crate::modules::health::MessageResponse;
use crate::modules::students::model::{ScoreCard, Student, StudentPayload};
use gradebook_core::{ErrorResponse, FieldError};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::check_root,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
    ),
    components(
        schemas(
            Student,
            ScoreCard,
            StudentPayload,
            MessageResponse,
            ErrorResponse,
            FieldError,
        )
    ),
    tags(
        (name = "Health", description = "Service readiness"),
        (name = "Students", description = "Student record management")
    ),
    info(
        title = "Gradebook API",
        version = "0.1.0",
        description = "Student records with per-subject scores and a derived average, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_student_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/students/"));
        assert!(paths.iter().any(|p| p.as_str() == "/students/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/"));
    }
}
