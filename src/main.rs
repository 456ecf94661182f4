use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use polyvoice::application::ports::{AudioDecoder, AudioEncoder, VoiceService};
use polyvoice::application::services::{ConversionManager, ConversionService};
use polyvoice::infrastructure::audio::{RawPcmDecoder, WavEncoder};
use polyvoice::infrastructure::gemini::GeminiVoiceService;
use polyvoice::infrastructure::observability::{TracingConfig, init_tracing};
use polyvoice::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .parse()
        .map_err(anyhow::Error::msg)?;
    let settings = Settings::load_for(environment).context("failed to load settings")?;

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;

    let tracing_config = TracingConfig::from_level(
        environment.as_str(),
        &settings.logging.level,
        settings.logging.enable_json,
    );
    init_tracing(&tracing_config, addr);

    let voice_service = Arc::new(GeminiVoiceService::new(settings.gemini.to_config()));
    if let Err(e) = voice_service.ensure_configured() {
        tracing::warn!(error = %e, "Conversions will be refused until a credential is configured");
    }

    let decoder: Arc<dyn AudioDecoder> = Arc::new(RawPcmDecoder::new(
        settings.audio.sample_rate,
        settings.audio.channels,
    ));
    let encoder: Arc<dyn AudioEncoder> = Arc::new(WavEncoder);

    let conversion_service = Arc::new(ConversionService::new(voice_service, decoder));
    let conversions = Arc::new(ConversionManager::new(
        conversion_service,
        encoder,
        settings.audio.output_filename.clone(),
    ));

    tracing::debug!(settings = ?settings, "Settings loaded");

    let state = AppState {
        conversions,
        settings,
    };

    let router = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
