use serde::Deserialize;
use serde_json::json;

/// Failure of a relay call as seen by the client.
#[derive(thiserror::Error, Debug)]
pub enum RelayError {
    /// The relay answered with an error body; the message is display-ready.
    #[error("{0}")]
    Api(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ReplyBody {
    #[serde(default)]
    reply: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the relay surface. Deliberately has no request timeout:
/// the client awaits the relay's response or failure, and the relay bounds
/// its own upstream calls.
pub struct RelayClient {
    http: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        Self::new(base_url)
    }

    pub async fn suggest_reply(&self, client_message: &str) -> Result<String, RelayError> {
        let url = format!("{}/api/reply", self.base_url.trim_end_matches('/'));
        let resp = self
            .http
            .post(&url)
            .json(&json!({ "clientMessage": client_message }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(RelayError::Api(read_error(resp).await));
        }

        let body: ReplyBody = resp.json().await?;
        body.reply
            .filter(|reply| !reply.is_empty())
            .ok_or_else(|| RelayError::Api("No reply returned.".to_string()))
    }

    pub async fn synthesize(
        &self,
        text: &str,
        voice_id: Option<&str>,
    ) -> Result<Vec<u8>, RelayError> {
        let url = format!("{}/api/tts", self.base_url.trim_end_matches('/'));
        let mut payload = json!({ "text": text });
        if let Some(voice_id) = voice_id {
            payload["voiceId"] = json!(voice_id);
        }

        let resp = self.http.post(&url).json(&payload).send().await?;

        if !resp.status().is_success() {
            return Err(RelayError::Api(read_error(resp).await));
        }

        Ok(resp.bytes().await?.to_vec())
    }
}

async fn read_error(resp: reqwest::Response) -> String {
    let status = resp.status();
    match resp.json::<ErrorBody>().await {
        Ok(ErrorBody {
            error: Some(message),
        }) => message,
        _ => status.to_string(),
    }
}
