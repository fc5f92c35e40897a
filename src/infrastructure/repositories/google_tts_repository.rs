use super::tts_repository::TtsRepository;
use crate::domain::tts::{AudioArtifact, AudioFormat, Language, SynthesisError};
use crate::infrastructure::storage::AudioStore;
use async_trait::async_trait;
use std::sync::Arc;

/// The translate_tts endpoint rejects requests longer than 100 characters
const MAX_CHUNK_CHARS: usize = 100;

/// Networked TTS backed by the Google Translate speech endpoint
pub struct GoogleTtsRepository {
    client: reqwest::Client,
    base_url: String,
    store: Arc<AudioStore>,
}

impl GoogleTtsRepository {
    pub fn new(client: reqwest::Client, base_url: String, store: Arc<AudioStore>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        }
    }

    /// Call the endpoint for a single chunk
    async fn call_google(
        &self,
        chunk: &str,
        index: usize,
        total: usize,
        language: Language,
    ) -> Result<Vec<u8>, SynthesisError> {
        let url = format!("{}/translate_tts", self.base_url);
        let index = index.to_string();
        let total = total.to_string();
        let text_length = chunk.chars().count().to_string();

        tracing::debug!(
            chunk_index = %index,
            chunk_length = %text_length,
            language = language.code(),
            "Calling networked TTS endpoint"
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language.code()),
                ("q", chunk),
                ("idx", index.as_str()),
                ("total", total.as_str()),
                ("textlen", text_length.as_str()),
            ])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    language = language.code(),
                    chunk_index = %index,
                    "Networked TTS request failed"
                );
                SynthesisError::Provider(e.to_string())
            })?;

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Provider(format!("Failed to read audio: {}", e)))?;

        if audio.is_empty() {
            return Err(SynthesisError::EmptyOutput);
        }
        Ok(audio.to_vec())
    }

    /// Synthesize every chunk in order and concatenate the MP3 frames
    async fn synthesize_chunks(
        &self,
        chunks: &[String],
        language: Language,
    ) -> Result<Vec<u8>, SynthesisError> {
        let mut merged_audio = Vec::new();

        for (index, chunk) in chunks.iter().enumerate() {
            let audio = self.call_google(chunk, index, chunks.len(), language).await?;
            merged_audio.extend(audio);
        }

        Ok(merged_audio)
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
    ) -> Result<AudioArtifact, SynthesisError> {
        let start_time = std::time::Instant::now();

        let chunks = split_into_chunks(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SynthesisError::Provider("No text to speak".to_string()));
        }

        tracing::info!(
            language = language.code(),
            chunk_count = chunks.len(),
            text_length = text.len(),
            "Starting networked TTS synthesis"
        );

        let audio = self.synthesize_chunks(&chunks, language).await?;
        let artifact = self.store.write(AudioFormat::Mp3, &audio).await?;

        tracing::info!(
            provider = "google",
            latency_ms = start_time.elapsed().as_millis(),
            chunk_count = chunks.len(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(artifact)
    }
}

/// Pack whitespace-separated words into chunks of at most `max_chars`
/// characters. Words longer than the limit are split by characters.
fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let separator = usize::from(!current.is_empty());
        if current_len + separator + word_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
