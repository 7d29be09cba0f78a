//! Text-to-speech backends.
//!
//! Both backends turn the full narration script into MP3 bytes with a single
//! request. The backend is picked once per run with [`build_synthesizer`].

mod azure;
mod elevenlabs;
mod profile;

pub use azure::AzureSynthesizer;
pub use elevenlabs::ElevenLabsSynthesizer;
pub use profile::VoiceProfile;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("{name} is required for the {backend} backend")]
    MissingCredential {
        name: &'static str,
        backend: &'static str,
    },
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Speech provider error: {status} - {detail}")]
    Provider { status: u16, detail: String },
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// ElevenLabs hosted voice generation
    #[value(name = "elevenlabs")]
    ElevenLabs,
    /// Azure cognitive services speech
    Azure,
}

/// Builds the synthesizer for `backend`, failing if its credentials are missing
pub fn build_synthesizer(
    backend: Backend,
    config: &Config,
    profile: VoiceProfile,
) -> Result<Box<dyn SpeechSynthesizer>> {
    match backend {
        Backend::ElevenLabs => {
            let api_key =
                credential(&config.elevenlabs_api_key, "ELEVENLABS_API_KEY", "elevenlabs")?;
            let mut synth = ElevenLabsSynthesizer::new(api_key)?;
            if let Some(voice_id) = &config.elevenlabs_voice_id {
                synth = synth.with_voice(voice_id);
            }
            Ok(Box::new(synth))
        }
        Backend::Azure => {
            let key = credential(&config.azure_speech_key, "AZURE_SPEECH_KEY", "azure")?;
            let region = credential(&config.azure_speech_region, "AZURE_SPEECH_REGION", "azure")?;
            Ok(Box::new(AzureSynthesizer::new(key, region, profile)?))
        }
    }
}

fn credential(
    value: &Option<String>,
    name: &'static str,
    backend: &'static str,
) -> Result<String, SpeechError> {
    value
        .clone()
        .ok_or(SpeechError::MissingCredential { name, backend })
}
