use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use parlance::application::services::{SessionArchiver, TranscriptionPipeline, TransformEngine};
use parlance::infrastructure::archive::ArchiveStoreFactory;
use parlance::infrastructure::llm::GeminiClient;
use parlance::infrastructure::observability::{TracingConfig, init_tracing};
use parlance::presentation::config::Settings;
use parlance::presentation::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("failed to load configuration")?;

    init_tracing(TracingConfig::default(), settings.server.port);

    let provider = Arc::new(GeminiClient::new(
        settings.provider.api_key.clone(),
        settings.provider.model.clone(),
        settings.provider.base_url.clone(),
    ));

    let archive_store = ArchiveStoreFactory::create(&settings.archive)
        .context("failed to initialize archive backend")?;
    let archiver = Arc::new(SessionArchiver::new(archive_store));

    let transcription_pipeline = Arc::new(TranscriptionPipeline::new(
        Arc::clone(&provider),
        Arc::clone(&archiver),
        settings.grounding.enabled,
        settings.grounding.max_terms,
        settings.pipeline.strict_retry_attempts,
    ));

    let transform_engine = Arc::new(TransformEngine::new(
        Arc::clone(&provider),
        Arc::clone(&archiver),
    ));

    let state = AppState {
        transcription_pipeline,
        transform_engine,
    };

    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    tracing::info!(model = %settings.provider.model, "Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
