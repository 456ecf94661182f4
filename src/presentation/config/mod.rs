mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AudioSettings, DEFAULT_OUTPUT_FILENAME, GeminiSettings, LoggingSettings, ServerSettings,
    Settings,
};
