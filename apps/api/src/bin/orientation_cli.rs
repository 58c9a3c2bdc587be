//! Stdin/stdout variant of the orientation service.
//!
//! Reads a questionnaire as JSON on stdin and prints a JSON result on
//! stdout. With `MISTRAL_API_KEY` set the recommendation comes from the
//! LLM (with the usual fallback on failure); without it the
//! deterministic engine answers directly.

use std::io::Read;
use std::process::ExitCode;

use serde_json::json;
use tracing_subscriber::EnvFilter;

use yva_api::llm_client::MistralClient;
use yva_api::orientation::fallback::generate_fallback_recommendation;
use yva_api::orientation::models::QuestionnaireResponse;
use yva_api::orientation::service::generate_recommendation;

fn decode_questionnaire(input: &str) -> Result<QuestionnaireResponse, String> {
    if input.trim().is_empty() {
        return Err("Aucune donnée reçue".to_string());
    }
    serde_json::from_str(input).map_err(|e| format!("Erreur de format JSON : {e}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        println!(
            "{}",
            json!({ "success": false, "error": format!("Erreur de lecture : {e}") })
        );
        return ExitCode::FAILURE;
    }

    let questionnaire = match decode_questionnaire(&input) {
        Ok(q) => q,
        Err(message) => {
            println!("{}", json!({ "success": false, "error": message }));
            return ExitCode::FAILURE;
        }
    };

    let recommendation = match std::env::var("MISTRAL_API_KEY") {
        Ok(api_key) if !api_key.is_empty() => {
            let llm = MistralClient::new(api_key);
            generate_recommendation(&llm, &questionnaire).await
        }
        _ => generate_fallback_recommendation(&questionnaire),
    };

    println!(
        "{}",
        json!({ "success": true, "recommendation": recommendation })
    );
    ExitCode::SUCCESS
}
