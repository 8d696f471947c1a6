use anyhow::Context;
use dotenvy::dotenv;
use gradebook::gradebook_config::{CorsConfig, DatabaseConfig, ServerConfig};
use gradebook::gradebook_db::run_migrations;
use gradebook::logging::{init_tracing, shutdown_tracer};
use gradebook::metrics::{init_metrics, metrics_app};
use gradebook::router::init_router;
use gradebook::state::init_app_state;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let server = ServerConfig::from_env();
    let database = DatabaseConfig::from_env()?;
    let cors = CorsConfig::from_env();

    let state = init_app_state(&database, cors)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&state.db)
        .await
        .context("Failed to run migrations")?;
    info!(storage_target = ?database.target, "Database ready");

    if let Some(handle) = init_metrics()? {
        let metrics_addr = server.metrics_addr().await?;
        let listener = tokio::net::TcpListener::bind(metrics_addr).await?;
        info!("Metrics available at http://{}/metrics", metrics_addr);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let addr = server.addr().await?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, init_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
