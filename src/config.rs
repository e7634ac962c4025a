use crate::upstream::{llm, tts, LlmConfig, TtsConfig};

/// Process-wide configuration, read from the environment once at startup and
/// passed into the relay pieces explicitly. No reload semantics.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub llm: LlmConfig,
    pub tts: TtsConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .expect("PORT must be a number");

        let llm = LlmConfig {
            base_url: env_or("LLM_BASE_URL", llm::DEFAULT_BASE_URL),
            api_key: non_empty_var("DEEPSEEK_API_KEY"),
            ..LlmConfig::default()
        };

        let tts = TtsConfig {
            base_url: env_or("ELEVENLABS_BASE_URL", tts::DEFAULT_BASE_URL),
            api_key: non_empty_var("ELEVENLABS_API_KEY"),
            default_voice_id: std::env::var("ELEVENLABS_VOICE_ID").unwrap_or_default(),
            ..TtsConfig::default()
        };

        Self {
            host,
            port,
            llm,
            tts,
        }
    }

    /// True when neither provider credential is set. A single missing key only
    /// warns; with no keys at all the server refuses to start.
    pub fn no_credentials(&self) -> bool {
        self.llm.api_key.is_none() && self.tts.api_key.is_none()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}
