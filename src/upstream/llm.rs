use std::time::Duration;

use reqwest::Client;
use serde_json::json;

use super::UpstreamError;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

const MODEL: &str = "deepseek/deepseek-r1-0528:free";

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// Single-turn chat-completions client used to draft the reply suggestion.
pub struct LlmClient {
    http: Client,
    cfg: LlmConfig,
}

impl LlmClient {
    pub fn new(cfg: LlmConfig) -> Self {
        let http = Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self { http, cfg }
    }

    /// Ask the model for a short, client-ready reply to `client_message`.
    ///
    /// A 2xx payload without the expected choices shape still succeeds: the
    /// raw serialized payload is returned as the reply text.
    pub async fn suggest_reply(&self, client_message: &str) -> Result<String, UpstreamError> {
        let url = format!(
            "{}/chat/completions",
            self.cfg.base_url.trim_end_matches('/')
        );

        let body = json!({
            "model": MODEL,
            "messages": [
                { "role": "user", "content": build_prompt(client_message) },
            ],
        });

        let mut req = self
            .http
            .post(&url)
            .header("content-type", "application/json");
        if let Some(key) = &self.cfg.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.json(&body).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        let raw = resp.text().await?;
        let reply = match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(payload) => {
                extract_choice_text(&payload).unwrap_or_else(|| payload.to_string())
            }
            Err(_) => raw,
        };

        Ok(reply)
    }
}

fn build_prompt(client_message: &str) -> String {
    format!(
        r#"You are a professional freelance assistant.
Your job is to create quick, client-ready responses that sound polite, confident, and clear.

Rules:
- Keep it under 40 words.
- Match the tone: professional, friendly, and helpful.
- Respond in the SAME LANGUAGE as the client's message.
- Do not add extra questions unless the client asked something unclear.
- Avoid emojis or slang.
- Keep formatting plain text.
- Do NOT explain why you chose these words or why the response will work.

Client message:
"{}"
"#,
        client_message
    )
}

fn extract_choice_text(v: &serde_json::Value) -> Option<String> {
    let text = v
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()?
        .trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
