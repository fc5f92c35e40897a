use super::tts_repository::TtsRepository;
use crate::domain::tts::{AudioArtifact, AudioFormat, Language, SynthesisError};
use crate::infrastructure::storage::AudioStore;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Speaking rate in words per minute
const SPEECH_RATE_WPM: u32 = 150;
/// Output volume, 0.0 to 1.0
const VOLUME: f32 = 0.9;

/// Offline TTS using a local espeak-ng compatible engine
pub struct EspeakTtsRepository {
    program: String,
    store: Arc<AudioStore>,
}

impl EspeakTtsRepository {
    pub fn new(program: String, store: Arc<AudioStore>) -> Self {
        Self { program, store }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether the engine can be started at all
    pub async fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// espeak amplitude runs 0..=200 with 100 as the neutral level
    fn amplitude() -> u32 {
        (VOLUME * 100.0).round() as u32
    }

    /// Run the engine, feeding the text on stdin and writing a WAV to `output`
    async fn run_engine(&self, text: &str, output: &Path) -> Result<(), SynthesisError> {
        let mut child = Command::new(&self.program)
            .arg("-s")
            .arg(SPEECH_RATE_WPM.to_string())
            .arg("-a")
            .arg(Self::amplitude().to_string())
            .arg("-w")
            .arg(output)
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SynthesisError::Engine(format!("failed to start {}: {}", self.program, e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SynthesisError::Engine(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }

    async fn render(&self, text: &str, artifact: &AudioArtifact) -> Result<(), SynthesisError> {
        self.run_engine(text, artifact.path()).await?;

        let size = tokio::fs::metadata(artifact.path()).await?.len();
        if size == 0 {
            return Err(SynthesisError::EmptyOutput);
        }
        Ok(())
    }
}

#[async_trait]
impl TtsRepository for EspeakTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        _language: Language,
    ) -> Result<AudioArtifact, SynthesisError> {
        let start_time = std::time::Instant::now();
        let artifact = self.store.reserve(AudioFormat::Wav)?;

        tracing::info!(
            program = %self.program,
            rate_wpm = SPEECH_RATE_WPM,
            volume = VOLUME,
            text_length = text.len(),
            "Starting offline TTS synthesis"
        );

        if let Err(e) = self.render(text, &artifact).await {
            self.store.discard(&artifact).await;
            return Err(e);
        }

        tracing::info!(
            provider = "espeak",
            latency_ms = start_time.elapsed().as_millis(),
            path = %artifact.path().display(),
            "TTS synthesis completed"
        );

        Ok(artifact)
    }
}
