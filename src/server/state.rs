use std::sync::Arc;

use anyhow::Result;

use crate::config::AppConfig;
use crate::llm::{ChatClient, LlmError, MistralClient};
use crate::tts::{GoogleTts, SpeechSynthesizer};

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone; nothing in it is mutable.
#[derive(Clone)]
pub struct AppState {
    /// Chat upstream.  `None` when no credential was configured, in which
    /// case `/generate-script` reports the missing key without any network
    /// call.
    pub chat: Option<Arc<dyn ChatClient>>,
    /// Speech upstream.
    pub tts: Arc<dyn SpeechSynthesizer>,
}

impl AppState {
    pub fn new(chat: Option<Arc<dyn ChatClient>>, tts: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { chat, tts }
    }

    /// Build the production clients.  A missing API key is logged and
    /// leaves `chat` empty; any other client construction error is fatal.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let chat = match MistralClient::from_config(&config.llm) {
            Ok(client) => {
                log::info!(
                    "Chat upstream: {} ({})",
                    config.llm.base_url,
                    config.llm.model
                );
                Some(Arc::new(client) as Arc<dyn ChatClient>)
            }
            Err(LlmError::MissingApiKey) => {
                log::warn!(
                    "{}; /generate-script will answer 500",
                    LlmError::MissingApiKey
                );
                None
            }
            Err(e) => return Err(e.into()),
        };

        let tts = Arc::new(GoogleTts::from_config(&config.tts)?);
        log::info!(
            "Speech upstream: {} (lang={}, slow={})",
            config.tts.base_url,
            config.tts.language,
            config.tts.slow
        );

        Ok(Self::new(chat, tts))
    }

    pub fn chat_configured(&self) -> bool {
        self.chat.is_some()
    }
}
