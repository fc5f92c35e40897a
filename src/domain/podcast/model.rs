use crate::domain::script::{PodcastLength, Tone};
use crate::domain::tts::AudioArtifact;

/// One conversion as submitted by the caller
#[derive(Debug, Clone, Default)]
pub struct ConversionRequest {
    pub pdf: Option<Vec<u8>>,
    pub topic: Option<String>,
    pub tone: Tone,
    pub length: PodcastLength,
    /// Display label, rendered verbatim in the script
    pub language: String,
    pub use_networked: bool,
}

/// Outcome of a conversion: audio plus script, or an explanation.
///
/// The audio is present iff synthesis succeeded, in which case the text is
/// exactly the script. Without audio the text says what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    audio: Option<AudioArtifact>,
    text: String,
}

impl ConversionResult {
    pub fn with_audio(artifact: AudioArtifact, script: String) -> Self {
        Self {
            audio: Some(artifact),
            text: script,
        }
    }

    pub fn without_audio(text: impl Into<String>) -> Self {
        Self {
            audio: None,
            text: text.into(),
        }
    }

    pub fn audio(&self) -> Option<&AudioArtifact> {
        self.audio.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    pub fn into_parts(self) -> (Option<AudioArtifact>, String) {
        (self.audio, self.text)
    }
}
