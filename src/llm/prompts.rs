use crate::error::Result;
use crate::schema::{GenerationRequest, SlideContent};

pub const SYSTEM_PROMPT: &str = "You are a presentation writer. You answer with raw JSON only: \
no prose, no Markdown, no code fences.";

const IMAGE_PROMPT_TEMPLATE: &str = "An engaging, high-quality image related to: {title}.";

const EXAMPLE_REPLY: &str = r#"[
  {"title": "Introduction", "content": ["What the topic is", "Why it matters"]},
  {"title": "Key Ideas", "content": ["First idea", "Second idea", "Third idea"]}
]"#;

/// Builds the instruction sent to the chat model for one deck.
pub fn slide_prompt(request: &GenerationRequest) -> Result<String> {
    let schema = schemars::schema_for!(Vec<SlideContent>);
    let schema_json = serde_json::to_string_pretty(&schema)?;

    Ok(format!(
        "Generate a presentation on {topic} with {count} slides.\n\n\
        Return ONLY a JSON array containing exactly {count} objects. Each object has:\n\
        - \"title\": a short slide title\n\
        - \"content\": an array of strings, one bullet point per string\n\n\
        The reply must validate against this JSON schema:\n{schema}\n\n\
        Example of the expected format:\n{example}",
        topic = request.topic(),
        count = request.slide_count(),
        schema = schema_json,
        example = EXAMPLE_REPLY,
    ))
}

pub fn image_prompt(title: &str) -> String {
    IMAGE_PROMPT_TEMPLATE.replace("{title}", title)
}
