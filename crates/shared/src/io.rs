use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FILE: &str = "podcast.mp3";

/// Write the synthesized audio, replacing any previous run's file
pub fn save_audio(audio: &[u8], path: &Path) -> Result<PathBuf> {
    if audio.is_empty() {
        anyhow::bail!("Refusing to write empty audio to {}", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    fs::write(path, audio)
        .with_context(|| format!("Failed to write audio file: {}", path.display()))?;

    Ok(path.to_path_buf())
}
