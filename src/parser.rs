//! Decodes the model's free-form reply into slide records.
//!
//! The reply is untrusted: it is first decoded as an untyped JSON document, then checked
//! against the `[{title, content}]` shape before any record is produced.

use crate::error::ParseError;
use crate::schema::{SlideContent, SlideRecord};
use log::debug;
use serde_json::Value;

pub fn parse(raw_text: &str) -> Result<Vec<SlideRecord>, ParseError> {
    let cleaned = strip_code_fence(raw_text);

    let document: Value = serde_json::from_str(cleaned)
        .map_err(|e| ParseError::new(format!("reply is not valid JSON: {}", e), raw_text))?;

    let items = match document {
        Value::Array(items) => items,
        other => {
            return Err(ParseError::new(
                format!("expected a JSON array of slides, found {}", json_kind(&other)),
                raw_text,
            ))
        }
    };

    let mut slides = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let content: SlideContent = serde_json::from_value(item)
            .map_err(|e| ParseError::new(format!("slide #{} is malformed: {}", idx, e), raw_text))?;

        if !content
            .title
            .chars()
            .any(|c| !c.is_control() && !c.is_whitespace())
        {
            return Err(ParseError::new(
                format!("slide #{} has an empty title", idx),
                raw_text,
            ));
        }

        slides.push(SlideRecord::from(content));
    }

    debug!("Parsed {} slides from model reply", slides.len());
    Ok(slides)
}

/// Removes a leading byte-order mark and one surrounding Markdown code fence
/// (```json ... ```), if present.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim().trim_start_matches('\u{FEFF}').trim_start();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") on the opening fence line.
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => body.trim(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHOTOSYNTHESIS: &str = r#"[{"title":"Intro","content":["Plants convert light to energy"]},{"title":"Process","content":["Occurs in chloroplasts"]},{"title":"Outputs","content":["Oxygen and glucose"]}]"#;

    #[test]
    fn test_parses_slides_in_order() {
        let slides = parse(PHOTOSYNTHESIS).unwrap();
        let titles: Vec<&str> = slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Intro", "Process", "Outputs"]);
        assert_eq!(slides[1].content_lines, vec!["Occurs in chloroplasts"]);
        assert!(slides.iter().all(|s| s.image_url.is_none()));
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_empty_content_is_allowed() {
        let slides = parse(r#"[{"title":"Questions?","content":[]}]"#).unwrap();
        assert_eq!(slides.len(), 1);
        assert!(slides[0].content_lines.is_empty());
    }

    #[test]
    fn test_not_json_keeps_raw_text() {
        let err = parse("not json").unwrap_err();
        assert_eq!(err.raw_text, "not json");
        assert!(err.reason.contains("not valid JSON"));
    }

    #[test]
    fn test_object_instead_of_array_fails() {
        let err = parse(r#"{"title":"Intro","content":["a"]}"#).unwrap_err();
        assert!(err.reason.contains("an object"));
    }

    #[test]
    fn test_scalar_content_fails() {
        let err = parse(r#"[{"title":"Intro","content":"just one line"}]"#).unwrap_err();
        assert!(err.reason.contains("slide #0"));
    }

    #[test]
    fn test_missing_title_fails() {
        assert!(parse(r#"[{"content":["a"]}]"#).is_err());
    }

    #[test]
    fn test_blank_title_fails() {
        let err = parse(r#"[{"title":"  ","content":["a"]}]"#).unwrap_err();
        assert!(err.reason.contains("empty title"));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let slides =
            parse(r#"[{"title":"Intro","content":["a"],"image_prompt":"a leaf"}]"#).unwrap();
        assert_eq!(slides[0].title, "Intro");
    }

    #[test]
    fn test_strips_markdown_fence() {
        let raw = format!("```json\n{}\n```", PHOTOSYNTHESIS);
        assert_eq!(parse(&raw).unwrap().len(), 3);
    }

    #[test]
    fn test_prose_around_json_fails() {
        let raw = format!("Here is your deck: {}", PHOTOSYNTHESIS);
        assert!(parse(&raw).is_err());
    }

    #[test]
    fn test_control_character_title_fails() {
        let err = parse("[{\"title\":\"\\u0007\\u0000 \",\"content\":[\"x\"]}]").unwrap_err();
        assert!(err.reason.contains("empty title"));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let slides = parse("\u{FEFF}[{\"title\":\"Intro\",\"content\":[\"Hello\"]}]").unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Intro");

        let fenced = parse("\u{FEFF}```json\n[{\"title\":\"Intro\",\"content\":[]}]\n```").unwrap();
        assert_eq!(fenced[0].title, "Intro");
    }
}
