//! Strict output types returned to callers of `/generate-script`.
//!
//! Field declaration order is the serialized order, which the frontend
//! relies on when it renders the raw JSON.

use serde::{Deserialize, Serialize};

/// Number of concepts in every [`ConceptSet`].
pub const CONCEPT_COUNT: usize = 3;
/// Number of scenes in every [`Concept`].
pub const SCENE_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// AssetType
// ---------------------------------------------------------------------------

/// Where a scene's visual comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    /// Visual is generated from the scene prompts.
    #[default]
    Generated,
    /// Visual is one of the images the caller uploaded.
    UserImage,
}

impl AssetType {
    /// Parse the wire name.  Anything other than `"user_image"` is
    /// `Generated`.
    pub fn from_wire(value: &str) -> Self {
        match value.trim() {
            "user_image" => Self::UserImage,
            _ => Self::Generated,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::UserImage => "user_image",
        }
    }
}

// ---------------------------------------------------------------------------
// Scene / Concept
// ---------------------------------------------------------------------------

/// One visual/audio beat of a concept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub asset_type: AssetType,
    /// `0` means no source image; otherwise a 1-based index into the
    /// caller's uploaded images.
    pub asset_index: u32,
    pub visual_prompt_th: String,
    pub visual_prompt_en: String,
    pub voiceover: String,
}

/// One of the creative ideas returned per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub concept_name: String,
    pub insight: String,
    pub hook: String,
    pub hashtags: Vec<String>,
    pub scenes: Vec<Scene>,
}

// ---------------------------------------------------------------------------
// ConceptSet
// ---------------------------------------------------------------------------

/// The normalized result of a script request: a bare JSON array of concepts.
///
/// Only the normalizer builds one, which is what guarantees the
/// 3 concepts × 4 scenes shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConceptSet(Vec<Concept>);

impl ConceptSet {
    pub(crate) fn new(concepts: Vec<Concept>) -> Self {
        Self(concepts)
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Concept> {
        self.0
    }

    /// Serialize to the JSON text embedded in the response envelope.
    /// Non-ASCII characters are written verbatim.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
