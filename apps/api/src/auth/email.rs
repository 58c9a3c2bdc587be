//! Transactional email via the Resend HTTP API.
//!
//! Delivery is best-effort: a failed send is logged and never fails the
//! request that triggered it.

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

const RESEND_API_URL: &str = "https://api.resend.com/emails";
const FROM: &str = "YVA <noreply@yva-togo.com>";

#[derive(Clone)]
pub struct Mailer {
    client: reqwest::Client,
    api_key: String,
    frontend_url: String,
}

impl Mailer {
    pub fn new(client: reqwest::Client, api_key: String, frontend_url: String) -> Self {
        Self {
            client,
            api_key,
            frontend_url,
        }
    }

    async fn send(&self, to: &str, subject: &str, text: String) {
        let result = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": FROM,
                "to": [to],
                "subject": subject,
                "text": text,
            }))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!("Email '{subject}' envoyé à {to}");
            }
            Ok(response) => {
                warn!(
                    "Échec d'envoi de l'email '{subject}' à {to} (status {})",
                    response.status()
                );
            }
            Err(e) => {
                warn!("Échec d'envoi de l'email '{subject}' à {to}: {e}");
            }
        }
    }

    pub async fn send_welcome_email(&self, to: &str, name: &str) {
        let text = format!(
            "Bonjour {name},\n\
            \n\
            Bienvenue sur YVA - Votre Assistant Virtuel !\n\
            \n\
            Nous sommes ravis de vous compter parmi nous. YVA est là pour vous accompagner\n\
            dans votre parcours personnel et professionnel.\n\
            \n\
            Voici ce que vous pouvez faire avec YVA :\n\
            🎯 Orientation scolaire et professionnelle\n\
            📚 Mini-formations adaptées à vos besoins\n\
            💪 Soutien moral et motivation\n\
            \n\
            Commencez dès maintenant en vous connectant à votre compte :\n\
            {login_url}\n\
            \n\
            Bonne découverte !\n\
            L'équipe YVA",
            login_url = format!("{}/login", self.frontend_url),
        );

        self.send(to, "Bienvenue sur YVA !", text).await;
    }

    pub async fn send_password_reset_email(&self, to: &str, name: &str, token: Uuid) {
        let reset_url = format!("{}/reset-password/{token}", self.frontend_url);
        let text = format!(
            "Bonjour {name},\n\
            \n\
            Vous avez demandé la réinitialisation de votre mot de passe YVA.\n\
            \n\
            Cliquez sur ce lien pour créer un nouveau mot de passe :\n\
            {reset_url}\n\
            \n\
            Ce lien expirera dans 1 heure pour des raisons de sécurité.\n\
            \n\
            Si vous n'avez pas demandé cette réinitialisation, vous pouvez ignorer cet email.\n\
            \n\
            Cordialement,\n\
            L'équipe YVA"
        );

        self.send(to, "Réinitialisation de votre mot de passe YVA", text)
            .await;
    }
}
