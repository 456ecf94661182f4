use std::fmt;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use crate::infrastructure::audio::{SPEECH_CHANNELS, SPEECH_SAMPLE_RATE};
use crate::infrastructure::gemini::{
    DEFAULT_ANALYSIS_MODEL, DEFAULT_BASE_URL, DEFAULT_SPEECH_MODEL, GeminiConfig,
};

use super::Environment;

pub const DEFAULT_OUTPUT_FILENAME: &str = "voice_conversion.wav";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub gemini: GeminiSettings,
    pub audio: AudioSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub analysis_model: String,
    pub speech_model: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Layout of the raw PCM returned by the speech model.
    pub sample_rate: u32,
    pub channels: u16,
    pub output_filename: String,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Reads `APP_ENVIRONMENT` and loads the matching configuration.
    pub fn load() -> Result<Self, ConfigError> {
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(ConfigError::Message)?;
        Self::load_for(environment)
    }

    /// Defaults, then `appsettings.{environment}.*` if present, then `APP_*`
    /// variables (`APP_GEMINI__API_KEY`, `APP_SERVER__PORT`, ...). A plain
    /// `GEMINI_API_KEY` fills the credential when nothing else did.
    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        let configuration = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(
                File::with_name(&format!(
                    "appsettings.{}",
                    environment.as_str().to_lowercase()
                ))
                .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = configuration.try_deserialize()?;

        if settings.gemini.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            settings.gemini.api_key = std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty());
        }

        Ok(settings)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.audio.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            gemini: GeminiSettings {
                api_key: None,
                base_url: DEFAULT_BASE_URL.to_string(),
                analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
                speech_model: DEFAULT_SPEECH_MODEL.to_string(),
                request_timeout_secs: 300,
            },
            audio: AudioSettings {
                sample_rate: SPEECH_SAMPLE_RATE,
                channels: SPEECH_CHANNELS,
                output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
                max_upload_mb: 50,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
                enable_json: false,
            },
        }
    }
}

impl GeminiSettings {
    pub fn to_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            analysis_model: self.analysis_model.clone(),
            speech_model: self.speech_model.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

impl fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("analysis_model", &self.analysis_model)
            .field("speech_model", &self.speech_model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
