//! Prompt templates for the two pipeline stages.
//!
//! The vision template asks for a single JSON object. Nothing here enforces
//! that; the contract gate checks the syntax of what comes back.

use sqg_protocol::chat::{ChatMessage, ContentPart};

use super::contract::VisionDescription;

/// Instruction text for the vision model.
pub fn vision_prompt(platform: &str, user_text: &str) -> String {
    format!(
        r#"**Task:** You are an image analysis assistant. Describe the screenshot below in detail so that another AI model, which cannot see the image, can understand its visual content and context. Output strictly in the JSON format requested.

**Context:**
- Operating system: {platform}
- Background: the user captured this screenshot while running a desktop application and hitting a problem.
- The user's original question: "{user_text}"

**Instructions:**
1. Analyze the whole screenshot, but FOCUS on the windows, regions and UI elements most relevant to the user's question "{user_text}".
2. Output a single JSON object with these keys (values must be valid JSON: strings, arrays, objects, booleans, numbers or null):
   - `main_window`: (string | null) title of the main window, if identifiable.
   - `relevant_elements`: (array of objects) UI elements relevant to the question. Each object has:
     - `type`: (string) element type, e.g. "button", "input", "menu", "text_block", "error_message".
     - `label`: (string | null) text label or icon description.
     - `value`: (string | boolean | number | null) state or content, e.g. input text or checkbox state.
     - `ocr_text`: (string | null) OCR text associated with the element.
   - `ocr_full_text`: (string | null) all text extracted from the screenshot, in every language present.
   - `visual_state_notes`: (array of strings) notable visual states, e.g. "Element X is highlighted", "Button Y is disabled".
   - `pointer_location`: (string | null) where the mouse pointer is, if visible and relevant.
3. Stay objective and describe only what is visible. Output exactly one valid JSON object with no explanatory prose and no ```json fences."#
    )
}

/// Multimodal message for the vision call: instruction text, then the image.
pub fn vision_message(platform: &str, user_text: &str, image_data_url: &str) -> ChatMessage {
    ChatMessage::user_parts(vec![
        ContentPart::text(vision_prompt(platform, user_text)),
        ContentPart::image_url(image_data_url),
    ])
}

/// Prompt for the target model; the description is embedded verbatim.
pub fn reasoning_prompt(
    platform: &str,
    user_text: &str,
    description: &VisionDescription,
) -> String {
    format!(
        r#"The user ran into a problem while using '{platform}'.
The user's question is: "{user_text}"

The user provided a screenshot. Here is a JSON description of its contents:
--- JSON START ---
{description}
--- JSON END ---

Based on the user's question and the JSON description of the screenshot above, analyze the likely causes of the problem and give detailed, actionable solutions or steps. Answer the user's original question directly, reasoning with the visual context provided."#,
        description = description.as_str()
    )
}
