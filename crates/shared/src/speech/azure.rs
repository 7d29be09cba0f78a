use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;

use super::{SpeechError, SpeechSynthesizer, VoiceProfile};

/// MP3, 24 kHz, 160 kbit/s, mono
pub const OUTPUT_FORMAT: &str = "audio-24khz-160kbitrate-mono-mp3";

pub struct AzureSynthesizer {
    client: Client,
    key: String,
    endpoint: String,
    profile: VoiceProfile,
}

impl AzureSynthesizer {
    pub fn new(
        key: impl Into<String>,
        region: impl AsRef<str>,
        profile: VoiceProfile,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(600))
            .user_agent("hn-podcast")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            key: key.into(),
            endpoint: format!(
                "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
                region.as_ref()
            ),
            profile,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SpeechSynthesizer for AzureSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .body(build_ssml(&self.profile, text))
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                %detail,
                voice = %self.profile.voice,
                "Azure speech synthesis failed"
            );
            return Err(SpeechError::Provider {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }
}

pub fn build_ssml(profile: &VoiceProfile, text: &str) -> String {
    let prosody = format!(
        "<prosody pitch=\"{}\" rate=\"{}\" volume=\"{}\">{}</prosody>",
        escape_xml(&profile.pitch),
        escape_xml(&profile.rate),
        escape_xml(&profile.volume),
        escape_xml(text)
    );

    let body = match &profile.style {
        Some(style) => format!(
            "<mstts:express-as style=\"{}\">{}</mstts:express-as>",
            escape_xml(style),
            prosody
        ),
        None => prosody,
    };

    format!(
        "<speak version=\"1.0\" xmlns=\"http://www.w3.org/2001/10/synthesis\" \
xmlns:mstts=\"https://www.w3.org/2001/mstts\" xml:lang=\"{}\">\
<voice name=\"{}\">{}</voice></speak>",
        profile.locale(),
        escape_xml(&profile.voice),
        body
    )
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
