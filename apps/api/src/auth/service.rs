//! Account operations: user rows, sessions, reset tokens.
//!
//! Handlers stay thin; every query and policy decision lives here.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::email::Mailer;
use crate::auth::google::GoogleIdentity;
use crate::auth::models::{PasswordResetTokenRow, User, UserProfileRow, UserSummary};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::tokens::{issue_token_pair, verify_refresh_token, IssuedTokens, TokenPair};
use crate::errors::AppError;

pub const MIN_PASSWORD_LEN: usize = 8;

const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Client metadata recorded with a session.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Outcome of an operation that opens a session.
#[derive(Debug)]
pub struct AuthOutcome {
    pub message: String,
    pub tokens: TokenPair,
    pub user: UserSummary,
}

async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

async fn open_session(
    pool: &PgPool,
    jwt_secret: &str,
    user: &User,
    meta: &ClientMeta,
) -> Result<IssuedTokens, AppError> {
    let issued = issue_token_pair(jwt_secret, user.id, &user.email)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token issuance failed: {e}")))?;

    sqlx::query(
        "INSERT INTO user_sessions (user_id, refresh_jti, ip_address, user_agent)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user.id)
    .bind(issued.refresh_jti)
    .bind(&meta.ip)
    .bind(&meta.user_agent)
    .execute(pool)
    .await?;

    Ok(issued)
}

/// Creates an account with email + password.
pub async fn signup(
    pool: &PgPool,
    mailer: &Mailer,
    jwt_secret: &str,
    name: &str,
    email: &str,
    password: &str,
    meta: &ClientMeta,
) -> Result<AuthOutcome, AppError> {
    let name = name.trim();
    let email = email.trim().to_lowercase();

    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Tous les champs sont requis".to_string(),
        ));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(
            "Le mot de passe doit contenir au moins 8 caractères".to_string(),
        ));
    }
    if find_user_by_email(pool, &email).await?.is_some() {
        return Err(AppError::Conflict(
            "Un compte avec cet email existe déjà".to_string(),
        ));
    }

    let password_hash = hash_password(password)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, full_name, password_hash, is_verified)
         VALUES ($1, $2, $3, TRUE)
         RETURNING *",
    )
    .bind(&email)
    .bind(name)
    .bind(&password_hash)
    .fetch_one(pool)
    .await?;

    sqlx::query("INSERT INTO user_profiles (user_id) VALUES ($1)")
        .bind(user.id)
        .execute(pool)
        .await?;

    let issued = open_session(pool, jwt_secret, &user, meta).await?;

    info!("Nouvel utilisateur créé: {email}");

    // Best-effort; a mail failure never fails the signup
    mailer
        .send_welcome_email(&user.email, user.display_name())
        .await;

    Ok(AuthOutcome {
        message: "Compte créé avec succès".to_string(),
        tokens: issued.pair,
        user: UserSummary::from(&user),
    })
}

/// Authenticates by email + password.
pub async fn login(
    pool: &PgPool,
    jwt_secret: &str,
    email: &str,
    password: &str,
    meta: &ClientMeta,
) -> Result<AuthOutcome, AppError> {
    let email = email.trim().to_lowercase();

    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Email et mot de passe requis".to_string(),
        ));
    }

    let user = find_user_by_email(pool, &email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Aucun compte trouvé avec cet email".to_string()))?;

    let password_matches = user
        .password_hash
        .as_deref()
        .map(|hash| verify_password(password, hash))
        .unwrap_or(false);
    if !password_matches {
        return Err(AppError::Unauthorized(
            "Mot de passe incorrect".to_string(),
        ));
    }

    if !user.is_active {
        return Err(AppError::Unauthorized("Compte désactivé".to_string()));
    }

    if let Some(ip) = &meta.ip {
        sqlx::query("UPDATE users SET last_login_ip = $1 WHERE id = $2")
            .bind(ip)
            .bind(user.id)
            .execute(pool)
            .await?;
    }

    let issued = open_session(pool, jwt_secret, &user, meta).await?;

    info!("Connexion réussie: {email}");

    Ok(AuthOutcome {
        message: "Connexion réussie".to_string(),
        tokens: issued.pair,
        user: UserSummary::from(&user),
    })
}

/// Matches or creates a user from a verified Google identity.
pub async fn google_auth(
    pool: &PgPool,
    jwt_secret: &str,
    identity: &GoogleIdentity,
    meta: &ClientMeta,
) -> Result<AuthOutcome, AppError> {
    let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE google_id = $1")
        .bind(&identity.google_id)
        .fetch_optional(pool)
        .await?;

    let user = match existing {
        Some(user) => {
            // Refresh the identity attributes Google owns
            sqlx::query_as::<_, User>(
                "UPDATE users SET full_name = $1, profile_picture = $2, updated_at = now()
                 WHERE id = $3
                 RETURNING *",
            )
            .bind(&identity.name)
            .bind(&identity.picture)
            .bind(user.id)
            .fetch_one(pool)
            .await?
        }
        None => match find_user_by_email(pool, &identity.email).await? {
            // Same email signed up with a password earlier — attach the Google id
            Some(user) => {
                sqlx::query_as::<_, User>(
                    "UPDATE users SET google_id = $1, profile_picture = $2, is_verified = TRUE,
                         updated_at = now()
                     WHERE id = $3
                     RETURNING *",
                )
                .bind(&identity.google_id)
                .bind(&identity.picture)
                .bind(user.id)
                .fetch_one(pool)
                .await?
            }
            None => {
                let user = sqlx::query_as::<_, User>(
                    "INSERT INTO users (email, full_name, google_id, profile_picture, is_verified)
                     VALUES ($1, $2, $3, $4, TRUE)
                     RETURNING *",
                )
                .bind(&identity.email)
                .bind(&identity.name)
                .bind(&identity.google_id)
                .bind(&identity.picture)
                .fetch_one(pool)
                .await?;

                sqlx::query("INSERT INTO user_profiles (user_id) VALUES ($1)")
                    .bind(user.id)
                    .execute(pool)
                    .await?;

                info!("Nouvel utilisateur Google créé: {}", identity.email);
                user
            }
        },
    };

    let issued = open_session(pool, jwt_secret, &user, meta).await?;

    Ok(AuthOutcome {
        message: "Connexion Google réussie".to_string(),
        tokens: issued.pair,
        user: UserSummary::from(&user),
    })
}

/// Exchanges a valid refresh token for a fresh pair.
///
/// Refresh tokens are single-use: the presented token's session is
/// closed and a new one opened, so a replayed token no longer matches
/// an active session.
pub async fn refresh_session(
    pool: &PgPool,
    jwt_secret: &str,
    refresh_token: &str,
    meta: &ClientMeta,
) -> Result<AuthOutcome, AppError> {
    let claims = verify_refresh_token(jwt_secret, refresh_token)
        .map_err(|_| AppError::Unauthorized("Token invalide ou expiré".to_string()))?;

    let session_id = sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM user_sessions WHERE refresh_jti = $1 AND is_active",
    )
    .bind(claims.jti)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::Unauthorized("Session expirée ou déconnectée".to_string()))?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(claims.sub)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Token invalide ou expiré".to_string()))?;

    if !user.is_active {
        return Err(AppError::Unauthorized("Compte désactivé".to_string()));
    }

    sqlx::query(
        "UPDATE user_sessions SET is_active = FALSE, last_activity = now() WHERE id = $1",
    )
    .bind(session_id)
    .execute(pool)
    .await?;

    let issued = open_session(pool, jwt_secret, &user, meta).await?;

    Ok(AuthOutcome {
        message: "Session renouvelée".to_string(),
        tokens: issued.pair,
        user: UserSummary::from(&user),
    })
}

/// Invalidates all of the user's active sessions.
pub async fn logout(pool: &PgPool, user_id: Uuid) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE user_sessions SET is_active = FALSE, last_activity = now()
         WHERE user_id = $1 AND is_active",
    )
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Loads a user and their profile row.
pub async fn fetch_profile(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<(User, UserProfileRow), AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Utilisateur introuvable".to_string()))?;

    let profile =
        sqlx::query_as::<_, UserProfileRow>("SELECT * FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Profil introuvable".to_string()))?;

    Ok((user, profile))
}

/// Issues a reset token and emails the reset link.
/// Answers identically whether or not the account exists.
pub async fn forgot_password(pool: &PgPool, mailer: &Mailer, email: &str) -> Result<(), AppError> {
    let email = email.trim().to_lowercase();

    let Some(user) = find_user_by_email(pool, &email).await? else {
        return Ok(());
    };

    let token = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);

    sqlx::query(
        "INSERT INTO password_reset_tokens (user_id, token, expires_at) VALUES ($1, $2, $3)",
    )
    .bind(user.id)
    .bind(token)
    .bind(expires_at)
    .execute(pool)
    .await?;

    mailer
        .send_password_reset_email(&user.email, user.display_name(), token)
        .await;

    Ok(())
}

/// Consumes a reset token and replaces the user's password.
pub async fn reset_password(
    pool: &PgPool,
    token: Uuid,
    new_password: &str,
) -> Result<(), AppError> {
    if new_password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(
            "Le mot de passe doit contenir au moins 8 caractères".to_string(),
        ));
    }

    let row = sqlx::query_as::<_, PasswordResetTokenRow>(
        "SELECT * FROM password_reset_tokens WHERE token = $1",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    let row = match row {
        Some(row) if row.is_valid(Utc::now()) => row,
        _ => {
            return Err(AppError::Validation(
                "Lien de réinitialisation invalide ou expiré".to_string(),
            ))
        }
    };

    let password_hash = hash_password(new_password)?;

    sqlx::query("UPDATE users SET password_hash = $1, updated_at = now() WHERE id = $2")
        .bind(&password_hash)
        .bind(row.user_id)
        .execute(pool)
        .await?;

    sqlx::query("UPDATE password_reset_tokens SET is_used = TRUE WHERE id = $1")
        .bind(row.id)
        .execute(pool)
        .await?;

    // A password change closes every open session
    logout(pool, row.user_id).await?;

    info!("Mot de passe réinitialisé pour l'utilisateur {}", row.user_id);

    Ok(())
}
