use async_trait::async_trait;
use shared::{SpeechError, SpeechSynthesizer};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct RecordingSynthesizer {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl RecordingSynthesizer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        self.calls.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(SpeechError::Provider {
                status: 401,
                detail: "invalid subscription key".into(),
            });
        }
        Ok(format!("AUDIO:{}", text.len()).into_bytes())
    }
}
