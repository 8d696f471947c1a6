//! Application error type with HTTP response conversion.
//!
//! Every failure a handler can return is an [`AppError`]. The [`ErrorKind`]
//! decides the HTTP status; the wrapped [`anyhow::Error`] keeps the cause
//! chain for logging. Validation failures also carry one [`FieldError`] per
//! violated rule so clients can tell which fields were rejected.
//!
//! # Response Body
//!
//! ```json
//! {
//!   "error": "Validation failed",
//!   "detail": [
//!     { "field": "grade", "message": "Grade must be between 1 and 12" }
//!   ]
//! }
//! ```
//!
//! `detail` is omitted when empty.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

/// Category of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input failed shape or range checks.
    Validation,
    /// Request could not be interpreted at all.
    BadRequest,
    /// Request collides with an existing record.
    Conflict,
    /// The addressed record does not exist.
    NotFound,
    /// The backing store failed; any partial write was rolled back.
    Storage,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::BadRequest | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Storage | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub detail: Vec<FieldError>,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
    pub details: Vec<FieldError>,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
            details: Vec::new(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BadRequest, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Conflict, err)
    }

    /// Wraps a storage failure. Clients only see "Database error occurred";
    /// the driver error stays in the chain for logs.
    pub fn storage<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Storage, err.into().context("Database error occurred"))
    }

    /// Builds a validation failure from a list of rejected fields.
    pub fn validation(details: Vec<FieldError>) -> Self {
        let summary = details
            .iter()
            .map(|d| format!("{}: {}", d.field, d.message))
            .collect::<Vec<_>>()
            .join(", ");

        let error = if summary.is_empty() {
            anyhow::anyhow!("Validation failed")
        } else {
            anyhow::anyhow!("Validation failed: {}", summary)
        };

        Self {
            kind: ErrorKind::Validation,
            error,
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(kind = ?self.kind, error = format!("{:#}", self.error), "Request failed");
        }

        let body = ErrorResponse {
            error: self.error.to_string(),
            detail: self.details,
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
