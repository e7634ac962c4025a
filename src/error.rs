use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Errors crossing the relay's HTTP boundary. Upstream detail never appears
/// here; handlers log it and map to one of the fixed variants below.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0} required")]
    MissingField(&'static str),

    #[error("An error occurred while generating a reply.")]
    ReplyFailed,

    #[error("Failed to load the voice. Please try again.")]
    VoiceFailed,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingField(_) => StatusCode::BAD_REQUEST,
            AppError::ReplyFailed | AppError::VoiceFailed => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
