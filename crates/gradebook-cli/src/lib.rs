//! # Gradebook CLI
//!
//! Database seeding utilities for Gradebook testing and development.
//!
//! ## Usage
//!
//! ```ignore
//! use gradebook_cli::seeder;
//!
//! let inserted = seeder::seed_students(&pool, 100).await?;
//! seeder::clear_students(&pool).await?;
//! ```

pub mod seeder;
