use crate::domain::tts::{AudioArtifact, Language, SynthesisError};
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts one speech backend (networked service, local engine, ...)
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Writing the rendered audio into a new artifact in the work directory
/// - Removing partial artifacts when synthesis fails
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech for a given language
    ///
    /// Returns a handle to the rendered audio in the backend's own format
    ///
    /// # Arguments
    /// * `text` - The full script, passed through unmodified
    /// * `language` - The resolved synthesis language
    ///
    /// # Errors
    /// Returns error if synthesis fails or the backend is unavailable
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
    ) -> Result<AudioArtifact, SynthesisError>;
}
