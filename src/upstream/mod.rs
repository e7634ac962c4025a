pub mod llm;
pub mod tts;

pub use llm::{LlmClient, LlmConfig};
pub use tts::{TtsClient, TtsConfig};

use reqwest::StatusCode;

/// Failure while calling an external provider. Carries full detail for
/// server-side logging; the HTTP boundary only ever sees the opaque
/// `AppError` variants.
#[derive(thiserror::Error, Debug)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}
