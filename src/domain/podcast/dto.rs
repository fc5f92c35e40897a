use serde::{Deserialize, Serialize};

pub const SUCCESS_STATUS: &str = "✅ Podcast generated successfully! 🎉";

/// Response for POST /api/podcast
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversionResponse {
    /// Single-use download link for the generated audio
    pub audio_url: Option<String>,
    pub transcript: String,
    pub status: String,
}

impl ConversionResponse {
    pub fn succeeded(audio_url: String, script: String) -> Self {
        Self {
            audio_url: Some(audio_url),
            transcript: script,
            status: SUCCESS_STATUS.to_string(),
        }
    }

    pub fn failed(text: &str) -> Self {
        Self {
            audio_url: None,
            transcript: format!("❌ {}", text),
            status: format!("Failed: {}", text),
        }
    }
}
