use super::model::{ConversionRequest, ConversionResult};
use crate::domain::pdf::PdfTextExtractor;
use crate::domain::script::{compose_script, ScriptParameters};
use crate::domain::tts::{SpeechSynthesizer, SpeechSynthesizerApi};
use async_trait::async_trait;
use std::sync::Arc;

pub const MISSING_PDF_MESSAGE: &str = "Please upload a PDF file";
pub const AUDIO_FAILED_NOTICE: &str = "❌ Audio generation failed. Please try again.";

pub struct ConversionService {
    extractor: Arc<PdfTextExtractor>,
    synthesizer: Arc<SpeechSynthesizer>,
}

impl ConversionService {
    pub fn new(extractor: Arc<PdfTextExtractor>, synthesizer: Arc<SpeechSynthesizer>) -> Self {
        Self {
            extractor,
            synthesizer,
        }
    }
}

#[async_trait]
pub trait ConversionServiceApi: Send + Sync {
    /// Turn an uploaded PDF into a podcast script and, if possible, audio
    ///
    /// This operation:
    /// - Rejects a missing or empty upload
    /// - Extracts the PDF text (bad PDFs become a user-facing message)
    /// - Composes the script
    /// - Synthesizes audio, falling back to the offline engine when asked
    ///
    /// Never fails: every problem is folded into the returned text. The audio
    /// artifact, if any, is handed over to the caller and not cleaned up here.
    async fn convert(&self, request: ConversionRequest) -> ConversionResult;
}

#[async_trait]
impl ConversionServiceApi for ConversionService {
    async fn convert(&self, request: ConversionRequest) -> ConversionResult {
        let pdf = match request.pdf.as_deref() {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => {
                tracing::warn!("Conversion requested without a PDF");
                return ConversionResult::without_audio(MISSING_PDF_MESSAGE);
            }
        };

        tracing::info!(
            pdf_size = pdf.len(),
            tone = %request.tone,
            length = %request.length,
            language = %request.language,
            use_networked = request.use_networked,
            "Podcast conversion request"
        );

        match self.run_pipeline(pdf, &request).await {
            Ok(result) => {
                tracing::info!(has_audio = result.has_audio(), "Podcast conversion finished");
                result
            }
            Err(e) => {
                tracing::error!(error = ?e, "Podcast conversion failed unexpectedly");
                ConversionResult::without_audio(format!("Error: {}", e))
            }
        }
    }
}

impl ConversionService {
    async fn run_pipeline(
        &self,
        pdf: &[u8],
        request: &ConversionRequest,
    ) -> anyhow::Result<ConversionResult> {
        // 1. Extract text
        let text = match self.extractor.extract(pdf).await {
            Ok(text) => text,
            Err(e) if e.is_user_facing() => {
                return Ok(ConversionResult::without_audio(e.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        // 2. Compose the script
        let params = ScriptParameters::new(
            request.topic.as_deref(),
            request.tone,
            request.length,
            request.language.clone(),
        );
        let script = compose_script(&text, &params);

        // 3. Synthesize, keeping the script even when audio fails
        let artifact = self
            .synthesizer
            .synthesize(&script, &request.language, request.use_networked)
            .await;

        Ok(match artifact {
            Some(artifact) => ConversionResult::with_audio(artifact, script),
            None => ConversionResult::without_audio(format!("{}\n\n{}", script, AUDIO_FAILED_NOTICE)),
        })
    }
}
