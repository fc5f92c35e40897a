use super::artifact::AudioArtifact;
use super::language::Language;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// One interchangeable text-to-speech implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechBackend {
    Networked,
    Offline,
}

impl SpeechBackend {
    /// Backends to attempt, in order. The first artifact produced wins.
    pub fn plan(use_networked: bool) -> &'static [SpeechBackend] {
        if use_networked {
            &[SpeechBackend::Networked, SpeechBackend::Offline]
        } else {
            &[SpeechBackend::Offline]
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechBackend::Networked => "networked",
            SpeechBackend::Offline => "offline",
        }
    }
}

impl std::fmt::Display for SpeechBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub struct SpeechSynthesizer {
    networked: Arc<dyn TtsRepository>,
    offline: Arc<dyn TtsRepository>,
}

impl SpeechSynthesizer {
    pub fn new(networked: Arc<dyn TtsRepository>, offline: Arc<dyn TtsRepository>) -> Self {
        Self { networked, offline }
    }
}

#[async_trait]
pub trait SpeechSynthesizerApi: Send + Sync {
    /// Render a script to audio
    ///
    /// `language` is the display label from the form; labels outside the
    /// supported table synthesize as English. Backend failures are logged and
    /// absorbed: the result is `None` only when every planned backend failed.
    async fn synthesize(
        &self,
        script: &str,
        language: &str,
        use_networked: bool,
    ) -> Option<AudioArtifact>;
}

#[async_trait]
impl SpeechSynthesizerApi for SpeechSynthesizer {
    async fn synthesize(
        &self,
        script: &str,
        language: &str,
        use_networked: bool,
    ) -> Option<AudioArtifact> {
        let language = Language::resolve(language);
        let plan = SpeechBackend::plan(use_networked);

        for (attempt, backend) in plan.iter().enumerate() {
            if attempt > 0 {
                tracing::warn!(backend = %backend, "Falling back to next speech backend");
            }
            if let Some(artifact) = self.attempt(*backend, script, language).await {
                return Some(artifact);
            }
        }

        tracing::error!(
            backends_tried = plan.len(),
            script_length = script.len(),
            "No speech backend produced audio"
        );
        None
    }
}

impl SpeechSynthesizer {
    fn repository(&self, backend: SpeechBackend) -> &Arc<dyn TtsRepository> {
        match backend {
            SpeechBackend::Networked => &self.networked,
            SpeechBackend::Offline => &self.offline,
        }
    }

    async fn attempt(
        &self,
        backend: SpeechBackend,
        script: &str,
        language: Language,
    ) -> Option<AudioArtifact> {
        let start_time = std::time::Instant::now();

        match self.repository(backend).synthesize(script, language).await {
            Ok(artifact) => {
                tracing::info!(
                    backend = %backend,
                    language = %language,
                    format = artifact.format().extension(),
                    latency_ms = start_time.elapsed().as_millis(),
                    "Speech backend produced audio"
                );
                Some(artifact)
            }
            Err(e) => {
                tracing::error!(
                    backend = %backend,
                    language = %language,
                    error = %e,
                    latency_ms = start_time.elapsed().as_millis(),
                    "Speech backend failed"
                );
                None
            }
        }
    }
}
