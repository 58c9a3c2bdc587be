//! Orientation — the recommendation flow.
//!
//! A questionnaire arrives over HTTP (or stdin via `orientation-cli`),
//! is validated field by field, rendered into a French prompt and sent to
//! the LLM. Any LLM failure is substituted with the deterministic
//! fallback engine so the caller always receives a recommendation.

pub mod fallback;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod service;
pub mod validation;
