use std::sync::Arc;

use crate::application::ports::VoiceService;
use crate::application::services::ConversionManager;
use crate::presentation::config::Settings;

pub struct AppState<V>
where
    V: VoiceService,
{
    pub conversions: Arc<ConversionManager<V>>,
    pub settings: Settings,
}

impl<V> Clone for AppState<V>
where
    V: VoiceService,
{
    fn clone(&self) -> Self {
        Self {
            conversions: Arc::clone(&self.conversions),
            settings: self.settings.clone(),
        }
    }
}
