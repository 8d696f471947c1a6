//! Student data models and DTOs.
//!
//! Re-exports student models from the `gradebook-models` crate.

pub use gradebook_models::students::*;
