//! Prompt builder for storyboard generation.
//!
//! [`PromptBuilder::build_chat`] returns a `(system_msg, user_msg)` pair for
//! an OpenAI-compatible `/v1/chat/completions` endpoint.  The system message
//! is a fixed Thai directive pinning the output shape, optionally followed
//! by the caller's own system instruction.

use crate::script::request::ScriptRequest;

// ---------------------------------------------------------------------------
// System instruction
// ---------------------------------------------------------------------------

/// Forces a JSON array of 3 concepts × 4 scenes and the asset convention for
/// user-supplied images.
const SYSTEM_DIRECTIVE_TH: &str = "
คุณคือ AI Director ต้องตอบ JSON Array มี 3 Object เท่านั้น
แต่ละ Object ต้องมีฟิลด์:
concept_name, insight, hook, hashtags, scenes
โดย scenes ต้องมี 4 Object เสมอ แต่ละ Object ต้องมี:
asset_type, asset_index, visual_prompt_th, visual_prompt_en, voiceover
ถ้า User ส่งรูปมาให้ใช้ asset_type='user_image' และ asset_index=ลำดับรูป (เริ่ม 1)
ถ้าไม่มีรูปให้ใช้ 'generated' และ asset_index=0
ห้ามตอบข้อความนอก JSON เด็ดขาด
";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds the chat message pair sent upstream.
///
/// # Example
/// ```rust
/// use thai_script_relay::script::{PromptBuilder, ScriptRequest};
///
/// let request = ScriptRequest::new("โจทย์: ชาไทย", None);
/// let (system, user) = PromptBuilder::new().build_chat(&request);
/// assert!(system.contains("JSON Array"));
/// assert_eq!(user, "โจทย์: ชาไทย");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the **(system_msg, user_msg)** pair.
    ///
    /// * `system_msg` — the fixed directive, then `"\n"` and the caller's
    ///   extra instruction when one was sent.
    /// * `user_msg` — the caller's text.  The chat upstream only sees text,
    ///   so attached images are announced by count to keep `asset_index`
    ///   references meaningful.
    pub fn build_chat(&self, request: &ScriptRequest) -> (String, String) {
        let mut system_msg = String::from(SYSTEM_DIRECTIVE_TH);
        if let Some(extra) = &request.extra_system_text {
            system_msg.push('\n');
            system_msg.push_str(extra);
        }

        let mut user_msg = request.user_text.clone();
        if request.image_count > 0 {
            user_msg.push_str(&format!(
                "\n[ผู้ใช้แนบรูปมา {} รูป (asset_index 1-{})]",
                request.image_count, request.image_count
            ));
        }

        (system_msg, user_msg)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
