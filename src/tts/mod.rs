//! Text-to-speech relay.
//!
//! * [`SpeechSynthesizer`] — async trait returning MP3 bytes.
//! * [`GoogleTts`] — Google Translate TTS backend (Thai, normal speed by
//!   default).
//! * [`split_text`] — cuts long narration into request-sized chunks.

pub mod chunk;
pub mod synth;

pub use chunk::{split_text, MAX_CHUNK_CHARS};
pub use synth::{GoogleTts, SpeechSynthesizer, TtsError};
