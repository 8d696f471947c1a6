//! # Gradebook Core
//!
//! Core types, errors, and utilities for the Gradebook API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Offset/limit list parameters
//! - [`serde`]: Custom serde deserialization helpers
//! - [`validation`]: Normalization trait and validator error flattening
//!
//! # Example
//!
//! ```ignore
//! use gradebook_core::errors::AppError;
//! use gradebook_core::pagination::ListParams;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//!
//! let params = ListParams::default();
//! assert_eq!(params.limit(), 10);
//! ```

pub mod errors;
pub mod pagination;
pub mod serde;
pub mod validation;

pub use errors::{AppError, ErrorKind, ErrorResponse, FieldError};
pub use pagination::ListParams;
pub use validation::{Normalize, field_errors};
