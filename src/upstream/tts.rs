use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use super::UpstreamError;

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io/v1";

const MODEL_ID: &str = "eleven_multilingual_v2";
const OUTPUT_FORMAT: &str = "mp3_44100_128";

#[derive(Debug, Clone)]
pub struct TtsConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub default_voice_id: String,
    pub request_timeout: Duration,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            default_voice_id: String::new(),
            // Audio generation is slower than text completion
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    output_format: &'a str,
}

/// ElevenLabs synthesis client. Returns raw MPEG audio bytes.
pub struct TtsClient {
    http: Client,
    cfg: TtsConfig,
}

impl TtsClient {
    pub fn new(cfg: TtsConfig) -> Self {
        let http = Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self { http, cfg }
    }

    /// Synthesize `text` with `voice_id`, falling back to the configured
    /// default voice when the caller supplies none (or an empty id).
    pub async fn synthesize(
        &self,
        text: &str,
        voice_id: Option<&str>,
    ) -> Result<Vec<u8>, UpstreamError> {
        let voice = voice_id
            .filter(|v| !v.is_empty())
            .unwrap_or(&self.cfg.default_voice_id);

        let url = format!(
            "{}/text-to-speech/{}",
            self.cfg.base_url.trim_end_matches('/'),
            voice
        );

        let mut req = self
            .http
            .post(&url)
            .header("Content-Type", "application/json");
        if let Some(key) = &self.cfg.api_key {
            req = req.header("xi-api-key", key);
        }

        let resp = req
            .json(&SynthesizeRequest {
                text,
                model_id: MODEL_ID,
                output_format: OUTPUT_FORMAT,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        Ok(resp.bytes().await?.to_vec())
    }
}
