use crate::domain::{
    AudioClip, ConversionArtifacts, ConversionMode, ConversionRequest, GeneratedOutput,
    MAX_REFERENCE_CLIPS, OutputId, PipelineResult, RunStatus, SpeakerId,
};

use super::activity_log::ActivityLog;
use super::conversion_service::ConversionFailure;

/// Form state of the converter: the chosen clips and mode plus everything the
/// last run produced.
#[derive(Debug, Default)]
pub struct ConversionSession {
    source: Option<AudioClip>,
    references: Vec<AudioClip>,
    mode: ConversionMode,
    status: RunStatus,
    log: ActivityLog,
    artifacts: ConversionArtifacts,
    error_message: Option<String>,
    output: Option<GeneratedOutput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceAdded {
    Accepted(SpeakerId),
    /// The list was already full; nothing changed.
    Rejected,
}

impl ConversionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<&AudioClip> {
        self.source.as_ref()
    }

    /// A new source invalidates the previous result.
    pub fn set_source(&mut self, clip: AudioClip) {
        tracing::debug!(filename = %clip.filename, bytes = clip.size_bytes(), "Source clip set");
        self.source = Some(clip);
        self.release_output();
    }

    pub fn clear_source(&mut self) -> Option<AudioClip> {
        self.source.take()
    }

    pub fn references(&self) -> &[AudioClip] {
        &self.references
    }

    pub fn add_reference(&mut self, clip: AudioClip) -> ReferenceAdded {
        if self.references.len() >= MAX_REFERENCE_CLIPS {
            self.log.warn(format!(
                "Warning: at most {} reference files are allowed.",
                MAX_REFERENCE_CLIPS
            ));
            return ReferenceAdded::Rejected;
        }
        self.references.push(clip);
        ReferenceAdded::Accepted(SpeakerId::from_upload_index(self.references.len() - 1))
    }

    /// Removes by 0-based index; later references move up one speaker slot.
    pub fn remove_reference(&mut self, index: usize) -> Result<AudioClip, SessionError> {
        if index >= self.references.len() {
            return Err(SessionError::ReferenceIndexOutOfRange {
                index,
                len: self.references.len(),
            });
        }
        Ok(self.references.remove(index))
    }

    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ConversionMode) {
        self.mode = mode;
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn artifacts(&self) -> &ConversionArtifacts {
        &self.artifacts
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn output(&self) -> Option<&GeneratedOutput> {
        self.output.as_ref()
    }

    /// Only the current output resolves; superseded ids do not.
    pub fn output_by_id(&self, id: OutputId) -> Option<&GeneratedOutput> {
        self.output.as_ref().filter(|o| o.id == id)
    }

    pub fn can_trigger(&self) -> bool {
        !self.status.is_running() && self.source.is_some() && !self.references.is_empty()
    }

    /// Records an error that stopped a run before it started. Status and
    /// previous results are left as they are.
    pub fn reject_run(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.log.error(format!("Error: {}", message));
        self.error_message = Some(message);
    }

    /// Validates the form and moves to `Running`, clearing all derived state.
    pub fn begin_run(&mut self) -> Result<ConversionRequest, BeginRunError> {
        if self.status.is_running() {
            return Err(BeginRunError::AlreadyRunning);
        }

        let request =
            match ConversionRequest::new(self.source.clone(), self.references.clone(), self.mode) {
                Ok(request) => request,
                Err(e) => {
                    self.reject_run(e.to_string());
                    return Err(BeginRunError::InvalidInput(e));
                }
            };

        self.log.clear();
        self.artifacts = ConversionArtifacts::default();
        self.error_message = None;
        self.release_output();
        self.status = RunStatus::Running;

        Ok(request)
    }

    pub fn complete_run(&mut self, result: &PipelineResult, output: GeneratedOutput) {
        self.artifacts = ConversionArtifacts::from(result);
        self.release_output();
        self.output = Some(output);
        self.status = RunStatus::Succeeded;
    }

    pub fn fail_run(&mut self, failure: ConversionFailure) {
        self.error_message = Some(failure.error.to_string());
        self.artifacts = failure.partial;
        self.status = RunStatus::Failed;
    }

    fn release_output(&mut self) {
        if let Some(previous) = self.output.take() {
            tracing::debug!(
                output_id = %previous.id.as_uuid(),
                bytes = previous.wav.len(),
                "Released generated output"
            );
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no reference clip at index {index} ({len} uploaded)")]
    ReferenceIndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum BeginRunError {
    #[error("a conversion is already running")]
    AlreadyRunning,
    #[error("{0}")]
    InvalidInput(#[from] crate::domain::InputError),
}
