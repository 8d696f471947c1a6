//! # Gradebook Models
//!
//! Domain models and DTOs for the Gradebook API.
//!
//! # Modules
//!
//! - [`students`]: The student entity, its score card, and the request payload
//!
//! # Example
//!
//! ```ignore
//! use gradebook_models::students::{NewStudent, StudentPayload};
//!
//! let student = NewStudent::from(payload);
//! assert_eq!(student.average_score(), Some(3.0));
//! ```

pub mod students;

pub use students::{NewStudent, ScoreCard, Student, StudentPayload, Subjects, average_score};
