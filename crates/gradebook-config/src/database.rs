//! Database connection settings.
//!
//! The storage target is chosen once, when the configuration is built, and
//! handed to the pool initializer. Nothing downstream reads the environment.
//!
//! # Environment Variables
//!
//! - `APP_ENV`: `test` selects the test target
//! - `TEST_ENV`: when set (any value), also selects the test target
//! - `DATABASE_URL`: connection string for the production target
//! - `TEST_DATABASE_URL`: connection string for the test target
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
//! - `DATABASE_ACQUIRE_TIMEOUT`: seconds to wait for a connection (default: 30)

use anyhow::Context;
use std::env;
use std::time::Duration;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageTarget {
    Production,
    Test,
}

impl StorageTarget {
    /// Environment variable holding the connection string for this target.
    pub fn url_var(self) -> &'static str {
        match self {
            StorageTarget::Production => "DATABASE_URL",
            StorageTarget::Test => "TEST_DATABASE_URL",
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub target: StorageTarget,
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(target: StorageTarget, url: impl Into<String>) -> Self {
        Self {
            target,
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_test = lookup("TEST_ENV").is_some()
            || lookup("APP_ENV").is_some_and(|v| v.eq_ignore_ascii_case("test"));
        let target = if is_test {
            StorageTarget::Test
        } else {
            StorageTarget::Production
        };

        let url_var = target.url_var();
        let url = lookup(url_var).with_context(|| format!("{} must be set", url_var))?;

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let acquire_timeout = lookup("DATABASE_ACQUIRE_TIMEOUT")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT);

        Ok(Self {
            target,
            url,
            max_connections,
            acquire_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_production_target_by_default() {
        let config =
            DatabaseConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://prod/db")]))
                .unwrap();
        assert_eq!(config.target, StorageTarget::Production);
        assert_eq!(config.url, "postgres://prod/db");
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_test_env_selects_test_url() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("TEST_ENV", "1"),
            ("DATABASE_URL", "postgres://prod/db"),
            ("TEST_DATABASE_URL", "postgres://test/db"),
        ]))
        .unwrap();
        assert_eq!(config.target, StorageTarget::Test);
        assert_eq!(config.url, "postgres://test/db");
    }

    #[test]
    fn test_app_env_test_is_case_insensitive() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "TEST"),
            ("TEST_DATABASE_URL", "postgres://test/db"),
        ]))
        .unwrap();
        assert_eq!(config.target, StorageTarget::Test);
    }

    #[test]
    fn test_missing_url_names_variable() {
        let err = DatabaseConfig::from_lookup(lookup_from(&[("TEST_ENV", "1")])).unwrap_err();
        assert_eq!(err.to_string(), "TEST_DATABASE_URL must be set");
    }

    #[test]
    fn test_max_connections_override() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://prod/db"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 20);
    }

    #[test]
    fn test_acquire_timeout() {
        let config =
            DatabaseConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://prod/db")]))
                .unwrap();
        assert_eq!(config.acquire_timeout, Duration::from_secs(30));

        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://prod/db"),
            ("DATABASE_ACQUIRE_TIMEOUT", "3"),
        ]))
        .unwrap();
        assert_eq!(config.acquire_timeout, Duration::from_secs(3));
    }
}
