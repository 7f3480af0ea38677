//! Application settings structs, defaults and TOML loading.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be read from TOML files and shared across handlers.  Every section is `#[serde(default)]`, so a partial
//! `settings.toml` only needs to name the values it changes.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Environment variable holding the chat-completion API credential.
pub const API_KEY_ENV: &str = "MISTRAL_API_KEY";

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

/// Settings for the HTTP listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g. `"0.0.0.0"`).
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Allowed CORS origins.  Empty means any origin is allowed.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            cors_origins: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Settings for the upstream chat-completion API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the API; `/v1/chat/completions` is appended.
    pub base_url: String,
    /// Bearer credential.  Usually supplied through `MISTRAL_API_KEY`
    /// rather than written to disk.
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    pub model: String,
    /// Per-request timeout.  `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mistral.ai".into(),
            api_key: None,
            model: "mistral-large-latest".into(),
            timeout_secs: None,
        }
    }
}

// ---------------------------------------------------------------------------
// TtsConfig
// ---------------------------------------------------------------------------

/// Settings for the upstream speech-synthesis service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    /// Base URL of the service; `/translate_tts` is appended.
    pub base_url: String,
    /// Narration language as an ISO-639-1 code.
    pub language: String,
    /// Slow narration speed.
    pub slow: bool,
    /// Per-request timeout.  `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.google.com".into(),
            language: "th".into(),
            slow: false,
            timeout_secs: None,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use thai_script_relay::config::AppConfig;
///
/// // Load (returns Default when the file is missing), then overlay the
/// // process environment.
/// let mut config = AppConfig::load().unwrap();
/// config.apply_env();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Chat-completion upstream settings.
    pub llm: LlmConfig,
    /// Speech-synthesis upstream settings.
    pub tts: TtsConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist, so a
    /// fresh deployment runs on defaults plus environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from `lookup`:
    ///
    /// | Variable          | Field            |
    /// |-------------------|------------------|
    /// | `MISTRAL_API_KEY` | `llm.api_key`    |
    /// | `HOST`            | `server.host`    |
    /// | `PORT`            | `server.port`    |
    ///
    /// Empty values are ignored, and so is a `PORT` that does not parse.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(API_KEY_ENV) {
            self.llm.api_key = Some(key);
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(e) => log::warn!("Ignoring invalid PORT {port:?}: {e}"),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 5000);
        assert!(cfg.server.cors_origins.is_empty());
        assert_eq!(cfg.llm.base_url, "https://api.mistral.ai");
        assert_eq!(cfg.llm.model, "mistral-large-latest");
        assert!(cfg.llm.api_key.is_none());
        assert!(cfg.llm.timeout_secs.is_none());
        assert_eq!(cfg.tts.language, "th");
        assert!(!cfg.tts.slow);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.llm.model, "mistral-large-latest");
    }

    #[test]
    fn full_file_overrides_every_section() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 8080
cors_origins = ["http://localhost:5173"]

[llm]
model = "mistral-small-latest"
timeout_secs = 45

[tts]
language = "en"
slow = true
"#,
        )
        .expect("write");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.server.host, "127.0.0.1");
        assert_eq!(loaded.server.port, 8080);
        assert_eq!(loaded.server.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(loaded.llm.model, "mistral-small-latest");
        assert_eq!(loaded.llm.timeout_secs, Some(45));
        assert!(loaded.llm.api_key.is_none());
        assert_eq!(loaded.tts.language, "en");
        assert!(loaded.tts.slow);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").expect("write");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.server.host, "0.0.0.0");
        assert_eq!(loaded.llm.base_url, "https://api.mistral.ai");
        assert_eq!(loaded.tts.language, "th");
    }

    #[test]
    fn env_overrides_key_host_and_port() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_from(env(&[
            ("MISTRAL_API_KEY", "sk-test"),
            ("HOST", "127.0.0.1"),
            ("PORT", "7000"),
        ]));

        assert_eq!(cfg.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 7000);
    }

    #[test]
    fn empty_or_invalid_env_values_are_ignored() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_from(env(&[("MISTRAL_API_KEY", "  "), ("PORT", "not-a-port")]));

        assert!(cfg.llm.api_key.is_none());
        assert_eq!(cfg.server.port, 5000);
    }
}
