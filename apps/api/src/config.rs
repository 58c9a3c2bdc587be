use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Constructed once in `main` and carried in `AppState` — nothing reads
/// the environment after startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub mistral_api_key: String,
    pub jwt_secret: String,
    pub google_client_id: String,
    pub resend_api_key: String,
    pub frontend_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            mistral_api_key: require_env("MISTRAL_API_KEY")?,
            jwt_secret: require_env("JWT_SECRET")?,
            google_client_id: require_env("GOOGLE_CLIENT_ID")?,
            resend_api_key: require_env("RESEND_API_KEY")?,
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
