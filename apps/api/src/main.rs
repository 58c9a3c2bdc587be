use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use yva_api::auth::email::Mailer;
use yva_api::config::Config;
use yva_api::db::create_pool;
use yva_api::llm_client::{self, MistralClient};
use yva_api::routes::build_router;
use yva_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.rust_log.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting YVA API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = MistralClient::new(config.mistral_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Shared outbound HTTP client (Google token verification)
    let http = reqwest::Client::new();

    // Transactional mail (welcome + password reset)
    let mailer = Mailer::new(
        http.clone(),
        config.resend_api_key.clone(),
        config.frontend_url.clone(),
    );

    let state = AppState {
        db,
        llm,
        mailer,
        http,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // frontend runs on a separate origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
