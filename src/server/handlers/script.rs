//! `POST /generate-script`

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::llm::LlmError;
use crate::script::{generate_script, GenerateRequest, GenerateResponse, ScriptRequest};
use crate::server::error::{ApiError, ApiResult};
use crate::server::state::AppState;

/// Generate 3 concepts for the caller's prompt.
///
/// The credential is checked before the body is even parsed.  The body is
/// parsed by hand so a malformed one is reported as `{"error": ...}` like
/// every other failure.
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<GenerateResponse>> {
    let chat = state.chat.as_deref().ok_or(LlmError::MissingApiKey)?;

    let payload: GenerateRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadBody(e.to_string()))?;
    let request = ScriptRequest::from_payload(&payload);

    let concepts = generate_script(chat, &request).await?;
    log::info!(
        "Generated {} concepts (prompt_len={}, images={})",
        concepts.concepts().len(),
        request.user_text.chars().count(),
        request.image_count
    );

    let response = GenerateResponse::from_concepts(&concepts)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(response))
}
