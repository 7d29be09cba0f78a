use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{SpeechError, SpeechSynthesizer};

/// "Bella"
pub const DEFAULT_VOICE_ID: &str = "EXAVITQu4vr4xnJE2PPo";
pub const DEFAULT_MODEL_ID: &str = "eleven_monolingual_v1";

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

pub struct ElevenLabsSynthesizer {
    client: Client,
    api_key: String,
    voice_id: String,
    model_id: String,
    base_url: String,
}

impl ElevenLabsSynthesizer {
    pub fn new(api_key: impl Into<String>) -> anyhow::Result<Self> {
        // Long scripts take a while to render
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(600))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            base_url: "https://api.elevenlabs.io".into(),
        })
    }

    pub fn with_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id)
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let body = SpeechRequest {
            text,
            model_id: &self.model_id,
        };

        let resp = self
            .client
            .post(self.endpoint())
            .header("xi-api-key", &self.api_key)
            .header("Accept", "audio/mpeg")
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %detail, "ElevenLabs synthesis failed");
            return Err(SpeechError::Provider {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_includes_voice() {
        let synth = ElevenLabsSynthesizer::new("key")
            .unwrap()
            .with_base_url("http://localhost:1")
            .with_voice("abc123");
        assert_eq!(synth.endpoint(), "http://localhost:1/v1/text-to-speech/abc123");
    }

    #[test]
    fn test_request_body() {
        let body = SpeechRequest {
            text: "Hello listeners",
            model_id: DEFAULT_MODEL_ID,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["text"], "Hello listeners");
        assert_eq!(json["model_id"], "eleven_monolingual_v1");
    }

    #[tokio::test]
    async fn test_transport_failure_is_an_error() {
        let synth = ElevenLabsSynthesizer::new("key")
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        assert!(matches!(
            synth.synthesize("hi").await,
            Err(SpeechError::Request(_))
        ));
    }
}
