use crate::config::AsrConfig;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Recognition session settings handed to each transcription request
    pub asr: Arc<AsrConfig>,
}

impl AppState {
    pub fn new(asr: AsrConfig) -> Self {
        Self { asr: Arc::new(asr) }
    }
}
