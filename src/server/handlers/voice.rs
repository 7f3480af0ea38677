//! `POST /generate-voice`

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::server::error::{ApiError, ApiResult};
use crate::server::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VoiceRequest {
    text: Option<String>,
}

/// Synthesize the given text and return it as `audio/mpeg`.
pub async fn generate(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    let payload: VoiceRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadBody(e.to_string()))?;

    let text = payload.text.unwrap_or_default();
    if text.is_empty() {
        return Err(ApiError::NoText);
    }

    let audio = state.tts.synthesize(&text).await?;
    log::info!(
        "Synthesized {} chars into {} bytes of audio",
        text.chars().count(),
        audio.len()
    );

    Ok(([(CONTENT_TYPE, "audio/mpeg")], audio).into_response())
}
