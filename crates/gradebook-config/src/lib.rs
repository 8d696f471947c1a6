//! # Gradebook Config
//!
//! Configuration types for the Gradebook API, loaded from environment
//! variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: Storage target and connection pool settings
//! - [`server`]: Listener addresses
//!
//! # Example
//!
//! ```ignore
//! use gradebook_config::{CorsConfig, DatabaseConfig, ServerConfig};
//!
//! let database = DatabaseConfig::from_env()?;
//! let cors = CorsConfig::from_env();
//! let server = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod server;

pub use cors::CorsConfig;
pub use database::{DatabaseConfig, StorageTarget};
pub use server::ServerConfig;
