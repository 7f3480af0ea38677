//! Upstream chat-completion client.
//!
//! * [`ChatClient`] — async trait implemented by chat backends (and by test
//!   stubs).
//! * [`MistralClient`] — OpenAI-compatible REST client asking for JSON
//!   output.
//! * [`LlmError`] — error variants for the upstream call.
//!
//! ```rust,no_run
//! use thai_script_relay::config::LlmConfig;
//! use thai_script_relay::llm::{ChatClient, MistralClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = LlmConfig {
//!         api_key: Some("sk-...".into()),
//!         ..LlmConfig::default()
//!     };
//!     let client = MistralClient::from_config(&config).unwrap();
//!     let raw = client
//!         .complete_json("ตอบเป็น JSON", "โจทย์: ชาไทย")
//!         .await
//!         .unwrap();
//!     println!("{raw}");
//! }
//! ```

pub mod client;

pub use client::{ChatClient, LlmError, MistralClient};
