// LLM prompt constants for the screening module.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// System prompt for entity tagging.
pub const ENTITY_SYSTEM: &str = JSON_ONLY_SYSTEM;

/// Entity tagging prompt. Replace `{text}` before sending.
pub const ENTITY_PROMPT_TEMPLATE: &str = r#"Identify the named entities in the resume text below.

Return a JSON array. Each element has this EXACT schema:
{"text": "<entity exactly as written>", "label": "<LABEL>"}

LABEL is one of: ORG, WORK_OF_ART, PRODUCT, PERSON, GPE, OTHER.
Return [] if there are none.

Resume text:
{text}"#;
