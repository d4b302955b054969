use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// When set, the 500 translator logs full error detail.
    pub enable_global_error_logging: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);
        let enable_global_error_logging = std::env::var("ENABLE_GLOBAL_ERROR_LOGGING")
            .map(|v| v == "true")
            .unwrap_or(false);
        Ok(Self {
            database_url,
            host,
            port,
            enable_global_error_logging,
        })
    }
}
