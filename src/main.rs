use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use lumecast::controllers::podcast::PodcastController;
use lumecast::domain::pdf::PdfTextExtractor;
use lumecast::domain::podcast::ConversionService;
use lumecast::domain::tts::SpeechSynthesizer;
use lumecast::infrastructure::config::{Config, LogFormat};
use lumecast::infrastructure::http::{build_router, start_http_server};
use lumecast::infrastructure::repositories::{EspeakTtsRepository, GoogleTtsRepository};
use lumecast::infrastructure::storage::AudioStore;

const NETWORKED_TTS_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting LumeCast on {}:{}",
        config.host,
        config.port
    );

    // Prepare the work directory for uploads and audio
    std::fs::create_dir_all(&config.work_dir)?;
    tracing::info!(work_dir = %config.work_dir.display(), "Work directory ready");

    if config.is_development() {
        tracing::debug!(?config, "Loaded configuration");
    }

    let config = Arc::new(config);
    let audio_store = Arc::new(AudioStore::new(config.work_dir.clone()));
    // Audio from a previous run can no longer be downloaded
    audio_store.purge().await?;

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Speech backends
    tracing::info!("Instantiating speech backends...");
    let http_client = reqwest::Client::builder()
        .user_agent(NETWORKED_TTS_USER_AGENT)
        .build()?;
    let networked_tts = Arc::new(GoogleTtsRepository::new(
        http_client,
        config.networked_tts_url.clone(),
        audio_store.clone(),
    ));
    let offline_tts = Arc::new(EspeakTtsRepository::new(
        config.offline_tts_program.clone(),
        audio_store.clone(),
    ));

    // Offline engine is only the fallback, so a missing binary is not fatal
    if offline_tts.is_available().await {
        tracing::info!(program = %offline_tts.program(), "Offline TTS engine available");
    } else {
        tracing::warn!(
            program = %offline_tts.program(),
            "Offline TTS engine not found. Conversions without networked TTS will produce no audio"
        );
    }

    // 2. Services
    tracing::info!("Instantiating services...");
    let extractor = Arc::new(PdfTextExtractor::new(config.work_dir.clone()));
    let synthesizer = Arc::new(SpeechSynthesizer::new(networked_tts, offline_tts.clone()));
    let conversion_service = Arc::new(ConversionService::new(extractor, synthesizer));

    // 3. Controllers
    tracing::info!("Instantiating controllers...");
    let podcast_controller = Arc::new(PodcastController::new(conversion_service, audio_store));

    // Start HTTP server with all routes
    let app = build_router(&config, offline_tts, podcast_controller);
    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "lumecast=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "lumecast=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
