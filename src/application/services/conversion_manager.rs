use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::application::ports::{AudioEncoder, VoiceService};
use crate::domain::{GeneratedOutput, InputError, RunStatus};

use super::conversion_service::ConversionService;
use super::conversion_session::{BeginRunError, ConversionSession};

/// Owns the session and gates runs: at most one conversion is in flight and
/// a trigger during a run is refused, not queued.
pub struct ConversionManager<V>
where
    V: VoiceService,
{
    service: Arc<ConversionService<V>>,
    encoder: Arc<dyn AudioEncoder>,
    session: Arc<Mutex<ConversionSession>>,
    output_filename: String,
}

impl<V> ConversionManager<V>
where
    V: VoiceService + 'static,
{
    pub fn new(
        service: Arc<ConversionService<V>>,
        encoder: Arc<dyn AudioEncoder>,
        output_filename: String,
    ) -> Self {
        Self {
            service,
            encoder,
            session: Arc::new(Mutex::new(ConversionSession::new())),
            output_filename,
        }
    }

    pub async fn session(&self) -> MutexGuard<'_, ConversionSession> {
        self.session.lock().await
    }

    pub fn output_mime_type(&self) -> &'static str {
        self.encoder.mime_type()
    }

    /// Starts a run in the background. The returned handle resolves to the
    /// final status once the run has been recorded in the session.
    pub async fn trigger(&self) -> Result<JoinHandle<RunStatus>, TriggerError> {
        let mut session = self.session.lock().await;

        if session.status().is_running() {
            tracing::debug!("Conversion trigger ignored: run in progress");
            return Err(TriggerError::AlreadyRunning);
        }

        if let Err(e) = self.service.ensure_configured() {
            let message = e.to_string();
            session.reject_run(message.clone());
            return Err(TriggerError::Configuration(message));
        }

        let request = session.begin_run().map_err(|e| match e {
            BeginRunError::AlreadyRunning => TriggerError::AlreadyRunning,
            BeginRunError::InvalidInput(e) => TriggerError::InvalidInput(e),
        })?;

        let log = session.log().clone();
        drop(session);

        let service = Arc::clone(&self.service);
        let encoder = Arc::clone(&self.encoder);
        let session = Arc::clone(&self.session);
        let filename = self.output_filename.clone();

        let span = tracing::info_span!(
            "conversion_run",
            mode = %request.mode(),
            speakers = request.speaker_count(),
            source = %request.source().filename,
        );

        let handle = tokio::spawn(
            async move {
                let outcome = service.run(&request, &log).await;

                let mut session = session.lock().await;
                match outcome {
                    Ok(result) => {
                        let wav = encoder.encode(&result.audio);
                        tracing::info!(
                            bytes = wav.len(),
                            duration_secs = result.audio.duration_secs(),
                            "Conversion succeeded"
                        );
                        session.complete_run(&result, GeneratedOutput::new(filename, wav));
                    }
                    Err(failure) => {
                        tracing::error!(error = %failure, "Conversion failed");
                        session.fail_run(failure);
                    }
                }
                session.status()
            }
            .instrument(span),
        );

        Ok(handle)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    #[error("a conversion is already running")]
    AlreadyRunning,
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    InvalidInput(#[from] InputError),
}
