use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    /// None for Google-only accounts.
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub profile_picture: String,
    pub is_verified: bool,
    pub is_active: bool,
    pub preferred_language: String,
    pub last_login_ip: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name shown to the user; falls back to the email local part.
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            self.email.split('@').next().unwrap_or(&self.email)
        } else {
            &self.full_name
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct UserProfileRow {
    pub user_id: Uuid,
    pub bio: String,
    pub interests: Json<Vec<String>>,
    pub skills: Json<Vec<String>>,
    pub goals: Json<Vec<String>>,
    pub education_level: String,
    pub current_school: String,
    pub employment_status: String,
    pub current_job: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetTokenRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: Uuid,
    pub expires_at: DateTime<Utc>,
    pub is_used: bool,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetTokenRow {
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && now <= self.expires_at
    }
}

/// User summary embedded in auth responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.display_name().to_string(),
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "afi@example.tg".to_string(),
            full_name: "Afi Mensah".to_string(),
            password_hash: None,
            google_id: None,
            profile_picture: String::new(),
            is_verified: true,
            is_active: true,
            preferred_language: "fr".to_string(),
            last_login_ip: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        assert_eq!(user().display_name(), "Afi Mensah");
    }

    #[test]
    fn test_display_name_falls_back_to_email_local_part() {
        let mut u = user();
        u.full_name = String::new();
        assert_eq!(u.display_name(), "afi");
    }

    #[test]
    fn test_reset_token_validity() {
        let now = Utc::now();
        let mut row = PasswordResetTokenRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token: Uuid::new_v4(),
            expires_at: now + Duration::hours(1),
            is_used: false,
            created_at: now,
        };
        assert!(row.is_valid(now));

        row.is_used = true;
        assert!(!row.is_valid(now));

        row.is_used = false;
        row.expires_at = now - Duration::minutes(1);
        assert!(!row.is_valid(now));
    }
}
