//! Storyboard script generation.
//!
//! This module provides:
//! * [`ConceptSet`] / [`Concept`] / [`Scene`] — the strict 3 × 4 output.
//! * [`build_fallback`] — deterministic placeholder content.
//! * [`normalize_response`] — shape check + field repair of a model reply;
//!   never fails.
//! * [`PromptBuilder`] — system/user messages for the chat upstream.
//! * [`ScriptRequest`] / [`GenerateRequest`] / [`GenerateResponse`] — the
//!   HTTP envelopes.
//! * [`generate_script`] — the whole flow against a [`ChatClient`].
//!
//! [`ChatClient`]: crate::llm::ChatClient

pub mod fallback;
pub mod generate;
pub mod model;
pub mod normalize;
pub mod prompt;
pub mod request;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use fallback::build_fallback;
pub use generate::generate_script;
pub use model::{AssetType, Concept, ConceptSet, Scene, CONCEPT_COUNT, SCENE_COUNT};
pub use normalize::{normalize_response, repair_concepts, validate_shape, ShapeError};
pub use prompt::PromptBuilder;
pub use request::{GenerateRequest, GenerateResponse, ScriptRequest};
