/// Voice settings applied to every utterance of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceProfile {
    pub name: String,
    pub voice: String,
    pub pitch: String,
    pub rate: String,
    pub volume: String,
    pub style: Option<String>,
}

impl VoiceProfile {
    pub const NAMES: &'static [&'static str] = &["newscaster", "friendly", "calm"];

    pub fn named(name: &str) -> Option<Self> {
        let profile = match name {
            "newscaster" => Self::default(),
            "friendly" => Self::build(
                name,
                "en-US-JennyNeural",
                "+2%",
                "+0%",
                "+0%",
                Some("friendly"),
            ),
            "calm" => Self::build(name, "en-GB-RyanNeural", "-2%", "-5%", "-10%", None),
            _ => return None,
        };
        Some(profile)
    }

    fn build(
        name: &str,
        voice: &str,
        pitch: &str,
        rate: &str,
        volume: &str,
        style: Option<&str>,
    ) -> Self {
        Self {
            name: name.to_string(),
            voice: voice.to_string(),
            pitch: pitch.to_string(),
            rate: rate.to_string(),
            volume: volume.to_string(),
            style: style.map(str::to_string),
        }
    }

    /// Locale prefix of the voice name, e.g. `en-US` for `en-US-GuyNeural`
    pub fn locale(&self) -> &str {
        let mut dashes = self.voice.match_indices('-').map(|(i, _)| i);
        match (dashes.next(), dashes.next()) {
            (Some(_), Some(end)) => &self.voice[..end],
            _ => "en-US",
        }
    }
}

impl Default for VoiceProfile {
    fn default() -> Self {
        Self::build(
            "newscaster",
            "en-US-GuyNeural",
            "+0Hz",
            "+5%",
            "+0%",
            Some("newscast"),
        )
    }
}
