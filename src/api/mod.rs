pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    // Absent field deserializes to "" so validation owns the 400, not serde
    #[serde(rename = "clientMessage", default)]
    pub client_message: String,
}

#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "voiceId", default)]
    pub voice_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VoiceInfo {
    pub name: String,
    #[serde(rename = "voiceId")]
    pub voice_id: String,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceInfo>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
