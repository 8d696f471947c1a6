//! Fake student data for local development.

mod students;

pub use students::{clear_students, generate_students, insert_students_batch, seed_students};

pub type SeedResult<T> = Result<T, Box<dyn std::error::Error>>;
