//! Recommendation orchestration: prompt → LLM → fallback substitution.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::llm_client::MistralClient;
use crate::orientation::fallback::generate_fallback_recommendation;
use crate::orientation::models::QuestionnaireResponse;
use crate::orientation::prompts::build_prompt;

/// Advisory wall-clock budget. Checked after the call returns — it does
/// not cancel an in-flight request, it only overrides the answer of a
/// call that came back too late.
pub const SOFT_TIMEOUT: Duration = Duration::from_secs(30);

/// Text substituted when the call succeeds past the advisory budget.
pub const TIMEOUT_MESSAGE: &str = "Erreur : Délai d'attente dépassé.";

/// Generates a recommendation for a validated questionnaire.
///
/// Never fails: any LLM failure is substituted with the deterministic
/// fallback engine so the caller always receives a recommendation.
pub async fn generate_recommendation(llm: &MistralClient, q: &QuestionnaireResponse) -> String {
    let prompt = build_prompt(q);

    let started = Instant::now();
    match llm.complete(&prompt).await {
        Ok(text) => {
            let elapsed = started.elapsed();
            if elapsed > SOFT_TIMEOUT {
                warn!(
                    "LLM answered after {:.1}s (budget {}s) — overriding with timeout message",
                    elapsed.as_secs_f64(),
                    SOFT_TIMEOUT.as_secs()
                );
                return TIMEOUT_MESSAGE.to_string();
            }
            info!("LLM recommendation generated in {:.1}s", elapsed.as_secs_f64());
            text
        }
        Err(e) => {
            warn!("LLM call failed ({e}) — answering with the fallback engine");
            generate_fallback_recommendation(q)
        }
    }
}
