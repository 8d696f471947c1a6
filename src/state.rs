use gradebook_config::{CorsConfig, DatabaseConfig};
use gradebook_db::init_db_pool;
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, cors_config: CorsConfig) -> Self {
        Self { db, cors_config }
    }
}

pub async fn init_app_state(
    database: &DatabaseConfig,
    cors_config: CorsConfig,
) -> Result<AppState, sqlx::Error> {
    Ok(AppState {
        db: init_db_pool(database).await?,
        cors_config,
    })
}
