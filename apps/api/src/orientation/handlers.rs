//! Axum route handlers for the Orientation API.

use axum::{extract::State, Json};

use crate::errors::{AppError, AppJson};
use crate::orientation::models::{OrientationResponse, QuestionnaireResponse};
use crate::orientation::service::generate_recommendation;
use crate::orientation::validation::validate;
use crate::state::AppState;

/// POST /api/orientation
///
/// Validates the questionnaire field by field, then answers with either
/// the LLM's text or the deterministic fallback.
pub async fn handle_orientation(
    State(state): State<AppState>,
    AppJson(questionnaire): AppJson<QuestionnaireResponse>,
) -> Result<Json<OrientationResponse>, AppError> {
    let errors = validate(&questionnaire);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join(" ; ")));
    }

    let text = generate_recommendation(&state.llm, &questionnaire).await;

    Ok(Json(OrientationResponse { data: vec![text] }))
}
