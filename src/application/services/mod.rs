mod activity_log;
mod conversion_manager;
mod conversion_service;
mod conversion_session;
mod synthesis_prompt;

pub use activity_log::{ActivityLog, LogEntry, LogLevel};
pub use conversion_manager::{ConversionManager, TriggerError};
pub use conversion_service::{ConversionError, ConversionFailure, ConversionService};
pub use conversion_session::{BeginRunError, ConversionSession, ReferenceAdded, SessionError};
pub use synthesis_prompt::{
    DEFAULT_PROSODY_NOTE, delivery_instruction, speaker_voice_assignments, synthesis_instruction,
};
