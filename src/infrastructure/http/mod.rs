use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod request_id;

pub use request_id::{request_id_middleware, X_REQUEST_ID};

use crate::controllers::{health, podcast::PodcastController};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::EspeakTtsRepository;

/// Build the application router with all routes configured
pub fn build_router(
    config: &Config,
    offline_engine: Arc<EspeakTtsRepository>,
    podcast_controller: Arc<PodcastController>,
) -> Router {
    // Podcast routes (public, uploads capped by config)
    let podcast_routes = Router::new()
        .route("/api/podcast", axum::routing::post(PodcastController::convert))
        .route(
            "/api/podcast/audio/:file_name",
            get(PodcastController::download_audio),
        )
        .with_state(podcast_controller)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(offline_engine)
        .merge(podcast_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
