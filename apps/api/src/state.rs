use sqlx::PgPool;

use crate::auth::email::Mailer;
use crate::config::Config;
use crate::llm_client::MistralClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: MistralClient,
    pub mailer: Mailer,
    /// Shared HTTP client for outbound calls outside the LLM wrapper
    /// (Google token verification).
    pub http: reqwest::Client,
    pub config: Config,
}
