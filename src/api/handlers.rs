use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{HealthResponse, ReplyRequest, ReplyResponse, TtsRequest, VoiceInfo, VoicesResponse};
use crate::api::routes::AppState;
use crate::client::VOICES;
use crate::error::AppError;

pub async fn reply(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReplyRequest>,
) -> Result<Json<ReplyResponse>, AppError> {
    // Validate input before any upstream call
    if request.client_message.is_empty() {
        return Err(AppError::MissingField("clientMessage"));
    }

    let reply = state
        .llm
        .suggest_reply(&request.client_message)
        .await
        .map_err(|e| {
            tracing::error!("Reply generation failed: {}", e);
            AppError::ReplyFailed
        })?;

    Ok(Json(ReplyResponse { reply }))
}

pub async fn tts(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TtsRequest>,
) -> Result<Response, AppError> {
    // Validate input before any upstream call
    if request.text.is_empty() {
        return Err(AppError::MissingField("text"));
    }

    let audio = state
        .tts
        .synthesize(&request.text, request.voice_id.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Voice synthesis failed: {}", e);
            AppError::VoiceFailed
        })?;

    // Return audio response
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response())
}

pub async fn list_voices() -> Json<VoicesResponse> {
    let voices = VOICES
        .iter()
        .map(|v| VoiceInfo {
            name: v.name.to_string(),
            voice_id: v.voice_id.to_string(),
        })
        .collect();

    Json(VoicesResponse { voices })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
