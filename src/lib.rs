//! Thai short-video script relay.
//!
//! Forwards storyboard requests to a chat-completion API, repairs whatever
//! comes back into exactly 3 concepts × 4 scenes, and relays Thai narration
//! text to a speech-synthesis service.
//!
//! * [`config`] — TOML settings plus environment overrides.
//! * [`script`] — fallback content, reply normalization, prompts, envelopes.
//! * [`llm`] — chat-completion client.
//! * [`tts`] — speech-synthesis client and text chunking.
//! * [`server`] — axum router and handlers.

pub mod config;
pub mod llm;
pub mod script;
pub mod server;
pub mod tts;
