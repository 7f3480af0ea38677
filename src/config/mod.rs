//! Configuration module for the script relay.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the HTTP server
//! and the two upstream services, `AppPaths` for the platform config
//! directory, and TOML loading via `AppConfig::load`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, LlmConfig, ServerConfig, TtsConfig, API_KEY_ENV};
