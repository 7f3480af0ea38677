//! One script request end to end: prompt, upstream call, normalization.

use crate::llm::{ChatClient, LlmError};
use crate::script::model::ConceptSet;
use crate::script::normalize::normalize_response;
use crate::script::prompt::PromptBuilder;
use crate::script::request::ScriptRequest;

/// Ask `client` for concepts and normalize the reply.
///
/// A reply with bad content never fails this call (it is replaced by
/// fallback content), but a failed upstream call is returned as-is.
pub async fn generate_script(
    client: &dyn ChatClient,
    request: &ScriptRequest,
) -> Result<ConceptSet, LlmError> {
    let (system_msg, user_msg) = PromptBuilder::new().build_chat(request);
    let raw = client.complete_json(&system_msg, &user_msg).await?;
    log::debug!("Model reply received ({} bytes)", raw.len());
    Ok(normalize_response(&raw, &request.topic))
}
