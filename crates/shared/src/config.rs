use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_voice_id: Option<String>,
    pub azure_speech_key: Option<String>,
    pub azure_speech_region: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::try_load_dotenv();

        let openai_api_key = env::var("OPENAI_API_KEY").context(
            "OPENAI_API_KEY not found.\n\n\
                To fix this, create ~/.config/hn-podcast/.env with:\n  \
                OPENAI_API_KEY=your_key_here\n  \
                ELEVENLABS_API_KEY=your_key_here   (for the elevenlabs backend)\n  \
                AZURE_SPEECH_KEY=your_key_here     (for the azure backend)\n  \
                AZURE_SPEECH_REGION=eastus\n\n\
                Get your OpenAI API key from: https://platform.openai.com/api-keys",
        )?;

        Ok(Self {
            openai_api_key,
            elevenlabs_api_key: Self::optional("ELEVENLABS_API_KEY"),
            elevenlabs_voice_id: Self::optional("ELEVENLABS_VOICE_ID"),
            azure_speech_key: Self::optional("AZURE_SPEECH_KEY"),
            azure_speech_region: Self::optional("AZURE_SPEECH_REGION"),
        })
    }

    fn optional(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    /// The working directory wins; otherwise the first readable fallback is loaded.
    /// Finding nothing is fine when the variables are set in the environment.
    fn try_load_dotenv() {
        if dotenvy::dotenv().is_ok() {
            return;
        }

        for path in dotenv_fallbacks() {
            if path.exists() && dotenvy::from_path(&path).is_ok() {
                return;
            }
        }
    }
}

fn dotenv_fallbacks() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|dir| dir.join("hn-podcast")),
        dirs::home_dir(),
    ]
    .into_iter()
    .flatten()
    .map(|dir| dir.join(".env"))
    .collect()
}
