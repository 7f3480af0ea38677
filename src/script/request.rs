//! Request/response envelopes of `POST /generate-script`.
//!
//! The frontend speaks a Gemini-style envelope:
//!
//! ```text
//! request:  { "contents": [{ "parts": [{ "text": "..." }, { "inline_data": {...} }] }],
//!             "systemInstruction": { "parts": [{ "text": "..." }] } }
//! response: { "candidates": [{ "content": { "parts": [{ "text": "<JSON array>" }] } }] }
//! ```
//!
//! Every level of the request is optional; missing or `null` pieces become
//! empty text.

use serde::{Deserialize, Deserializer, Serialize};

use crate::script::model::ConceptSet;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub contents: Vec<Content>,
    pub system_instruction: Option<Content>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
    #[serde(deserialize_with = "null_as_default")]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(alias = "inlineData", skip_serializing)]
    pub inline_data: Option<serde_json::Value>,
}

/// `null` deserializes like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
pub struct Candidate {
    pub content: Content,
}

impl GenerateResponse {
    /// Wrap `concepts` as the JSON text of a single content part.
    pub fn from_concepts(concepts: &ConceptSet) -> serde_json::Result<Self> {
        let text = concepts.to_json()?;
        Ok(Self {
            candidates: vec![Candidate {
                content: Content {
                    parts: vec![Part {
                        text: Some(text),
                        inline_data: None,
                    }],
                },
            }],
        })
    }
}

// ---------------------------------------------------------------------------
// ScriptRequest
// ---------------------------------------------------------------------------

/// What the script flow needs from one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    /// Text of the first part of the first content block.
    pub user_text: String,
    /// Text of the first system-instruction part, if any.
    pub extra_system_text: Option<String>,
    /// Topic embedded in fallback content.  Same as `user_text`.
    pub topic: String,
    /// Number of inline images in the first content block.
    pub image_count: usize,
}

impl ScriptRequest {
    pub fn new(user_text: impl Into<String>, extra_system_text: Option<String>) -> Self {
        let user_text = user_text.into();
        Self {
            topic: user_text.clone(),
            user_text,
            extra_system_text,
            image_count: 0,
        }
    }

    pub fn from_payload(payload: &GenerateRequest) -> Self {
        let first = payload.contents.first();

        let user_text = first
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.clone())
            .unwrap_or_default();

        let extra = payload
            .system_instruction
            .as_ref()
            .and_then(|c| c.parts.first())
            .map(|p| p.text.clone().unwrap_or_default());

        let image_count = first
            .map(|c| c.parts.iter().filter(|p| p.inline_data.is_some()).count())
            .unwrap_or(0);

        Self {
            image_count,
            ..Self::new(user_text, extra)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
