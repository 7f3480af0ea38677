#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use thai_script_relay::config::ServerConfig;
use thai_script_relay::llm::{ChatClient, LlmError};
use thai_script_relay::server::{build_router, AppState};
use thai_script_relay::tts::{SpeechSynthesizer, TtsError};

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// Chat upstream returning a fixed reply (or a transport error) and
/// recording what it was sent.
pub struct StubChat {
    reply: Option<String>,
    pub calls: AtomicUsize,
    pub last_messages: Mutex<Option<(String, String)>>,
}

impl StubChat {
    pub fn replying(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(None),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatClient for StubChat {
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = Some((system.to_string(), user.to_string()));
        self.reply
            .clone()
            .ok_or_else(|| LlmError::Request("connection refused".into()))
    }
}

/// Speech upstream echoing a fixed MP3-ish payload, or failing.
pub struct StubTts {
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl StubTts {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }
}

pub const FAKE_MP3: &[u8] = b"ID3\x03\x00fake-mp3";

#[async_trait]
impl SpeechSynthesizer for StubTts {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, TtsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(TtsError::Status {
                status: 503,
                chunk: 0,
            })
        } else {
            Ok(FAKE_MP3.to_vec())
        }
    }
}

// ---------------------------------------------------------------------------
// App + request helpers
// ---------------------------------------------------------------------------

pub fn build_test_app(chat: Option<Arc<StubChat>>, tts: Arc<StubTts>) -> Router {
    let chat = chat.map(|c| c as Arc<dyn ChatClient>);
    let state = AppState::new(chat, tts);
    build_router(state, &ServerConfig::default())
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
