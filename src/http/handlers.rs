use super::state::AppState;
use crate::asr::{self, AsrError};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::{error, info};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /transcribe
/// Transcribe a WAV buffer uploaded as the request body
pub async fn transcribe(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    info!(bytes = body.len(), "received transcription request");

    match asr::transcribe(&state.asr, &body).await {
        Ok(text) => (StatusCode::OK, Json(TranscribeResponse { text })).into_response(),
        Err(e) => {
            error!("Transcription failed: {}", e);
            let status = match &e {
                AsrError::UnsupportedAudioFormat(_) => StatusCode::BAD_REQUEST,
                AsrError::AuthenticationConfigMissing(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AsrError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, Json(ErrorResponse { error: e.to_string() })).into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
