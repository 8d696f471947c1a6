//! # Gradebook DB
//!
//! PostgreSQL connection pool and schema migrations.
//!
//! # Example
//!
//! ```ignore
//! use gradebook_config::DatabaseConfig;
//! use gradebook_db::{init_db_pool, run_migrations};
//!
//! let config = DatabaseConfig::from_env()?;
//! let pool = init_db_pool(&config).await?;
//! run_migrations(&pool).await?;
//! ```

use gradebook_config::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use sqlx::PgPool;

/// SQL migrations under the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens a connection pool against the configured storage target.
///
/// The returned pool is cheaply cloneable and should live in the
/// application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        target_db = ?config.target,
        max_connections = config.max_connections,
        "Connecting to database"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
}

/// Builds a pool that only connects on first use.
///
/// Fails only when the connection string cannot be parsed.
pub fn init_lazy_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy(&config.url)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
