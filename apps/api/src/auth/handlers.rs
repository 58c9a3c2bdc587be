//! Axum handlers for the auth endpoints. Request parsing and response
//! shaping only; the work happens in [`crate::auth::service`].

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extract::AuthUser;
use crate::auth::google::verify_google_token;
use crate::auth::models::{User, UserProfileRow, UserSummary};
use crate::auth::service::{self, ClientMeta};
use crate::auth::tokens::TokenPair;
use crate::errors::{AppError, AppJson};
use crate::state::AppState;

// ─── Request bodies ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleAuthRequest {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: Uuid,
    #[serde(default)]
    pub password: String,
}

// ─── Response bodies ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenPair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

impl AuthResponse {
    fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            tokens: None,
            user: None,
        }
    }
}

impl From<service::AuthOutcome> for AuthResponse {
    fn from(outcome: service::AuthOutcome) -> Self {
        Self {
            success: true,
            message: outcome.message,
            tokens: Some(outcome.tokens),
            user: Some(outcome.user),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: ProfileUser,
}

#[derive(Debug, Serialize)]
pub struct ProfileUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub profile_picture: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub profile: ProfileDetails,
}

#[derive(Debug, Serialize)]
pub struct ProfileDetails {
    pub bio: String,
    pub interests: Vec<String>,
    pub skills: Vec<String>,
    pub goals: Vec<String>,
    pub education_level: String,
    pub current_school: String,
    pub employment_status: String,
    pub current_job: String,
}

impl ProfileUser {
    fn new(user: User, profile: UserProfileRow) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            profile_picture: user.profile_picture,
            is_verified: user.is_verified,
            created_at: user.created_at,
            profile: ProfileDetails {
                bio: profile.bio,
                interests: profile.interests.0,
                skills: profile.skills.0,
                goals: profile.goals.0,
                education_level: profile.education_level,
                current_school: profile.current_school,
                employment_status: profile.employment_status,
                current_job: profile.current_job,
            },
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────

/// Client IP and user agent, as seen through a reverse proxy.
fn client_meta(headers: &HeaderMap) -> ClientMeta {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let user_agent = headers
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    ClientMeta { ip, user_agent }
}

// ─── Handlers ────────────────────────────────────────────────────────

pub async fn handle_signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(req): AppJson<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let meta = client_meta(&headers);
    let outcome = service::signup(
        &state.db,
        &state.mailer,
        &state.config.jwt_secret,
        &req.name,
        &req.email,
        &req.password,
        &meta,
    )
    .await?;
    Ok(Json(outcome.into()))
}

pub async fn handle_login(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let meta = client_meta(&headers);
    let outcome = service::login(
        &state.db,
        &state.config.jwt_secret,
        &req.email,
        &req.password,
        &meta,
    )
    .await?;
    Ok(Json(outcome.into()))
}

pub async fn handle_google_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(req): AppJson<GoogleAuthRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let identity = verify_google_token(&state.http, &state.config.google_client_id, &req.token)
        .await
        .map_err(|_| AppError::Unauthorized("Token Google invalide".to_string()))?;

    let meta = client_meta(&headers);
    let outcome =
        service::google_auth(&state.db, &state.config.jwt_secret, &identity, &meta).await?;
    Ok(Json(outcome.into()))
}

pub async fn handle_refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(req): AppJson<RefreshTokenRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let meta = client_meta(&headers);
    let outcome =
        service::refresh_session(&state.db, &state.config.jwt_secret, &req.refresh, &meta).await?;
    Ok(Json(outcome.into()))
}

pub async fn handle_logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<AuthResponse>, AppError> {
    service::logout(&state.db, user.user_id).await?;
    Ok(Json(AuthResponse::message_only("Déconnexion réussie")))
}

pub async fn handle_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let (user, profile) = service::fetch_profile(&state.db, user.user_id).await?;
    Ok(Json(ProfileResponse {
        success: true,
        user: ProfileUser::new(user, profile),
    }))
}

pub async fn handle_forgot_password(
    State(state): State<AppState>,
    AppJson(req): AppJson<ForgotPasswordRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    service::forgot_password(&state.db, &state.mailer, &req.email).await?;
    Ok(Json(AuthResponse::message_only(
        "Si un compte existe avec cet email, un lien de réinitialisation a été envoyé",
    )))
}

pub async fn handle_reset_password(
    State(state): State<AppState>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    service::reset_password(&state.db, req.token, &req.password).await?;
    Ok(Json(AuthResponse::message_only(
        "Mot de passe réinitialisé avec succès",
    )))
}
