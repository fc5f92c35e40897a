use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::{
        podcast::{ConversionRequest, ConversionResponse, ConversionService, ConversionServiceApi},
        script::{PodcastLength, Tone},
        tts::Language,
    },
    error::{AppError, AppResult},
    infrastructure::storage::AudioStore,
};

pub struct PodcastController {
    conversion_service: Arc<ConversionService>,
    audio_store: Arc<AudioStore>,
}

impl PodcastController {
    pub fn new(conversion_service: Arc<ConversionService>, audio_store: Arc<AudioStore>) -> Self {
        Self {
            conversion_service,
            audio_store,
        }
    }

    /// POST /api/podcast - Convert an uploaded PDF into a podcast
    pub async fn convert(
        State(controller): State<Arc<PodcastController>>,
        multipart: Multipart,
    ) -> AppResult<Json<ConversionResponse>> {
        let request = read_form(multipart).await?;

        let result = controller.conversion_service.convert(request).await;

        let (audio, text) = result.into_parts();
        let response = match audio.as_ref().and_then(|artifact| artifact.file_name()) {
            Some(file_name) => {
                ConversionResponse::succeeded(format!("/api/podcast/audio/{}", file_name), text)
            }
            None => ConversionResponse::failed(&text),
        };

        Ok(Json(response))
    }

    /// GET /api/podcast/audio/:file_name - Download generated audio (once)
    pub async fn download_audio(
        State(controller): State<Arc<PodcastController>>,
        Path(file_name): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let (format, audio) = controller
            .audio_store
            .take(&file_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Audio {}", file_name)))?;

        tracing::info!(
            file_name = %file_name,
            audio_size_bytes = audio.len(),
            "Audio artifact delivered and removed"
        );

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(format.content_type()),
        );

        Ok((StatusCode::OK, headers, Body::from(audio)))
    }
}

/// Collect the upload form into a conversion request.
///
/// Missing choices take the form defaults; unknown tone or length values are
/// rejected. The optional `url` field is accepted for form compatibility but
/// not used.
async fn read_form(mut multipart: Multipart) -> AppResult<ConversionRequest> {
    let mut request = ConversionRequest {
        language: Language::default().display_name().to_string(),
        use_networked: true,
        ..Default::default()
    };

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "pdf" => {
                let bytes = field.bytes().await?;
                request.pdf = Some(bytes.to_vec());
            }
            "question" => {
                let question = read_text(field).await?;
                request.topic = Some(question).filter(|q| !q.is_empty());
            }
            "tone" => {
                request.tone = read_text(field)
                    .await?
                    .parse::<Tone>()
                    .map_err(AppError::BadRequest)?;
            }
            "length" => {
                request.length = read_text(field)
                    .await?
                    .parse::<PodcastLength>()
                    .map_err(AppError::BadRequest)?;
            }
            "language" => {
                request.language = read_text(field).await?;
            }
            "use_advanced_audio" => {
                request.use_networked = parse_flag(&read_text(field).await?)?;
            }
            "url" => {
                let url = read_text(field).await?;
                if !url.is_empty() {
                    tracing::debug!(url = %url, "Ignoring url field");
                }
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    Ok(request)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    Ok(field.text().await?)
}

fn parse_flag(value: &str) -> AppResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" => Ok(false),
        _ => Err(AppError::BadRequest(format!(
            "use_advanced_audio must be true or false, got {}",
            value
        ))),
    }
}
