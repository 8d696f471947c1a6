use std::env;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::from_origins("http://localhost:3000,http://localhost:5173")
    }
}

impl CorsConfig {
    pub fn from_env() -> Self {
        match env::var("ALLOWED_ORIGINS") {
            Ok(origins) => Self::from_origins(&origins),
            Err(_) => Self::default(),
        }
    }

    fn from_origins(origins: &str) -> Self {
        let allowed_origins = origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}
