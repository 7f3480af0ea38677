//! `SpeechSynthesizer` trait and the Google Translate TTS implementation.
//!
//! [`GoogleTts`] sends each chunk from [`split_text`] as
//! `GET {base_url}/translate_tts?ie=UTF-8&q=…&tl=th&client=tw-ob&ttsspeed=1`
//! and concatenates the MP3 segments in order, which players treat as one
//! continuous stream.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::TtsConfig;
use crate::tts::chunk::{split_text, MAX_CHUNK_CHARS};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

// ---------------------------------------------------------------------------
// TtsError
// ---------------------------------------------------------------------------

/// Errors that can occur during speech synthesis.
#[derive(Debug, Error)]
pub enum TtsError {
    /// Nothing left to speak once whitespace is removed.
    #[error("No text to send to TTS API")]
    EmptyText,

    /// HTTP transport or connection error.
    #[error("TTS request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("{status} from TTS API for chunk {chunk}")]
    Status { status: u16, chunk: usize },

    /// The service answered with an empty body.
    #[error("TTS API returned no audio for chunk {0}")]
    EmptyAudio(usize),
}

impl From<reqwest::Error> for TtsError {
    fn from(e: reqwest::Error) -> Self {
        TtsError::Request(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Async text-to-speech backend producing MP3 bytes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError>;
}

// ---------------------------------------------------------------------------
// GoogleTts
// ---------------------------------------------------------------------------

/// Google Translate TTS client.
#[derive(Debug)]
pub struct GoogleTts {
    client: reqwest::Client,
    url: String,
    language: String,
    slow: bool,
}

impl GoogleTts {
    pub fn from_config(config: &TtsConfig) -> Result<Self, TtsError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            url: format!("{}/translate_tts", config.base_url.trim_end_matches('/')),
            language: config.language.clone(),
            slow: config.slow,
        })
    }

    async fn fetch_chunk(
        &self,
        idx: usize,
        total: usize,
        chunk: &str,
    ) -> Result<Vec<u8>, TtsError> {
        let speed = if self.slow { "0.3" } else { "1" };
        let total = total.to_string();
        let idx_str = idx.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", self.language.as_str()),
                ("client", "tw-ob"),
                ("ttsspeed", speed),
                ("total", total.as_str()),
                ("idx", idx_str.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TtsError::Status {
                status: status.as_u16(),
                chunk: idx,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(TtsError::EmptyAudio(idx));
        }
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(TtsError::EmptyText);
        }

        log::debug!(
            "Synthesizing {} chars in {} chunk(s), lang={}",
            text.chars().count(),
            chunks.len(),
            self.language
        );

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let segment = self.fetch_chunk(idx, chunks.len(), chunk).await?;
            audio.extend_from_slice(&segment);
        }
        Ok(audio)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
