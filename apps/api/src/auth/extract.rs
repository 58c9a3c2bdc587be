//! Bearer-token extractor for protected routes.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::tokens::verify_access_token;
use crate::errors::AppError;
use crate::state::AppState;

/// Authenticated caller, extracted from the `Authorization: Bearer` header.
/// Handlers that take an `AuthUser` argument reject unauthenticated calls
/// with 401 before running.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Authentification requise".to_string()))?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Format du header Authorization invalide".to_string())
        })?;

        let claims = verify_access_token(&state.config.jwt_secret, token)
            .map_err(|_| AppError::Unauthorized("Token invalide ou expiré".to_string()))?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}
