//! Session tokens: a short-lived access JWT and a long-lived refresh JWT.
//!
//! Both are HS256, signed with `JWT_SECRET`. The refresh token's `jti`
//! is recorded in `user_sessions` so refresh and logout can invalidate
//! it; access tokens are not tracked and simply expire.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const ACCESS_TTL: Duration = Duration::hours(1);
pub const REFRESH_TTL: Duration = Duration::days(30);

const TOKEN_TYPE_ACCESS: &str = "access";
const TOKEN_TYPE_REFRESH: &str = "refresh";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Wrong token type: expected {expected}, got {got}")]
    WrongType { expected: String, got: String },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    pub email: String,
    pub token_type: String,
    /// Unique token id; the refresh jti is recorded in user_sessions.
    pub jti: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Access/refresh pair returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// A freshly issued pair plus the refresh token's jti for session tracking.
#[derive(Debug)]
pub struct IssuedTokens {
    pub pair: TokenPair,
    pub refresh_jti: Uuid,
}

fn sign(secret: &str, claims: &Claims) -> Result<String, TokenError> {
    Ok(encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Issues an access + refresh pair for a user.
pub fn issue_token_pair(secret: &str, user_id: Uuid, email: &str) -> Result<IssuedTokens, TokenError> {
    let now = Utc::now();
    let refresh_jti = Uuid::new_v4();

    let access = sign(
        secret,
        &Claims {
            sub: user_id,
            email: email.to_string(),
            token_type: TOKEN_TYPE_ACCESS.to_string(),
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + ACCESS_TTL).timestamp(),
        },
    )?;

    let refresh = sign(
        secret,
        &Claims {
            sub: user_id,
            email: email.to_string(),
            token_type: TOKEN_TYPE_REFRESH.to_string(),
            jti: refresh_jti,
            iat: now.timestamp(),
            exp: (now + REFRESH_TTL).timestamp(),
        },
    )?;

    Ok(IssuedTokens {
        pair: TokenPair { access, refresh },
        refresh_jti,
    })
}

fn verify(secret: &str, token: &str, expected_type: &str) -> Result<Claims, TokenError> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    if data.claims.token_type != expected_type {
        return Err(TokenError::WrongType {
            expected: expected_type.to_string(),
            got: data.claims.token_type,
        });
    }

    Ok(data.claims)
}

/// Verifies an access token and returns its claims.
pub fn verify_access_token(secret: &str, token: &str) -> Result<Claims, TokenError> {
    verify(secret, token, TOKEN_TYPE_ACCESS)
}

/// Verifies a refresh token and returns its claims.
pub fn verify_refresh_token(secret: &str, token: &str) -> Result<Claims, TokenError> {
    verify(secret, token, TOKEN_TYPE_REFRESH)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_access_token_round_trip() {
        let user_id = Uuid::new_v4();
        let issued = issue_token_pair(SECRET, user_id, "afi@example.tg").unwrap();

        let claims = verify_access_token(SECRET, &issued.pair.access).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "afi@example.tg");
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_refresh_jti_matches_claims() {
        let issued = issue_token_pair(SECRET, Uuid::new_v4(), "afi@example.tg").unwrap();
        let claims = verify_refresh_token(SECRET, &issued.pair.refresh).unwrap();
        assert_eq!(claims.jti, issued.refresh_jti);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let issued = issue_token_pair(SECRET, Uuid::new_v4(), "afi@example.tg").unwrap();
        let err = verify_access_token(SECRET, &issued.pair.refresh).unwrap_err();
        assert!(matches!(err, TokenError::WrongType { .. }));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = issue_token_pair(SECRET, Uuid::new_v4(), "afi@example.tg").unwrap();
        assert!(verify_access_token("other-secret", &issued.pair.access).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(verify_access_token(SECRET, "not.a.jwt").is_err());
    }

    #[test]
    fn test_each_pair_gets_a_fresh_refresh_jti() {
        // Rotation depends on every pair carrying its own session id
        let user_id = Uuid::new_v4();
        let first = issue_token_pair(SECRET, user_id, "afi@example.tg").unwrap();
        let second = issue_token_pair(SECRET, user_id, "afi@example.tg").unwrap();
        assert_ne!(first.refresh_jti, second.refresh_jti);
    }

    #[test]
    fn test_access_expires_before_refresh() {
        let issued = issue_token_pair(SECRET, Uuid::new_v4(), "afi@example.tg").unwrap();
        let access = verify_access_token(SECRET, &issued.pair.access).unwrap();
        let refresh = verify_refresh_token(SECRET, &issued.pair.refresh).unwrap();
        assert!(access.exp < refresh.exp);
    }
}
