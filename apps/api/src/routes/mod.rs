pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::orientation::handlers as orientation_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Orientation API
        .route(
            "/api/orientation",
            post(orientation_handlers::handle_orientation),
        )
        // Auth API
        .route("/api/auth/signup", post(auth_handlers::handle_signup))
        .route("/api/auth/login", post(auth_handlers::handle_login))
        .route(
            "/api/auth/google-auth",
            post(auth_handlers::handle_google_auth),
        )
        .route("/api/auth/refresh", post(auth_handlers::handle_refresh))
        .route("/api/auth/logout", post(auth_handlers::handle_logout))
        .route("/api/auth/profile", get(auth_handlers::handle_profile))
        .route(
            "/api/auth/forgot-password",
            post(auth_handlers::handle_forgot_password),
        )
        .route(
            "/api/auth/reset-password",
            post(auth_handlers::handle_reset_password),
        )
        .with_state(state)
}
