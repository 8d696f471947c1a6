use anyhow::Context;
use std::env;
use std::net::SocketAddr;

/// Listener addresses for the API and the Prometheus exporter.
///
/// `HOST` may be an IP literal or a hostname such as `localhost`.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub metrics_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            metrics_port: 3001,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            metrics_port: env::var("METRICS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.metrics_port),
        }
    }

    pub async fn addr(&self) -> anyhow::Result<SocketAddr> {
        resolve(&self.host, self.port).await
    }

    pub async fn metrics_addr(&self) -> anyhow::Result<SocketAddr> {
        resolve(&self.host, self.metrics_port).await
    }
}

async fn resolve(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("Invalid HOST {}", host))?
        .next()
        .with_context(|| format!("HOST {} resolved to no addresses", host))
}
