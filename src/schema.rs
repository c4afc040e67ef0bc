use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlideDeckError};

/// What the user asked for: a topic and how many slides to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    topic: String,
    slide_count: u32,
}

impl GenerationRequest {
    /// Validates user input before any network call is made.
    pub fn new(topic: impl Into<String>, slide_count: u32) -> Result<Self> {
        let topic = topic.into().trim().to_string();

        if topic.is_empty() {
            return Err(SlideDeckError::InvalidRequest(
                "topic must not be empty".to_string(),
            ));
        }

        if slide_count == 0 {
            return Err(SlideDeckError::InvalidRequest(
                "slide count must be at least 1".to_string(),
            ));
        }

        Ok(Self { topic, slide_count })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn slide_count(&self) -> u32 {
        self.slide_count
    }
}

/// The shape the model is instructed to emit for each slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SlideContent {
    #[schemars(description = "Short slide title (a few words)")]
    pub title: String,

    #[schemars(
        description = "Bullet points for the slide body, one string per line, without bullet characters"
    )]
    pub content: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideRecord {
    pub title: String,
    pub content_lines: Vec<String>,
    /// Location of the generated illustration. `None` until enriched, or when generation failed.
    pub image_url: Option<String>,
}

impl SlideRecord {
    pub fn new(title: impl Into<String>, content_lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            content_lines,
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Body text as shown on the slide, one line per entry.
    pub fn body_text(&self) -> String {
        self.content_lines.join("\n")
    }
}

impl From<SlideContent> for SlideRecord {
    fn from(value: SlideContent) -> Self {
        Self::new(value.title, value.content)
    }
}

/// An assembled presentation: the slides it was built from and the serialized package.
#[derive(Debug, Clone)]
pub struct SlideDeck {
    slides: Vec<SlideRecord>,
    embedded_images: usize,
    bytes: Vec<u8>,
}

impl SlideDeck {
    pub(crate) fn new(slides: Vec<SlideRecord>, embedded_images: usize, bytes: Vec<u8>) -> Self {
        Self {
            slides,
            embedded_images,
            bytes,
        }
    }

    pub fn slides(&self) -> &[SlideRecord] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn embedded_images(&self) -> usize {
        self.embedded_images
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_trims_topic() {
        let request = GenerationRequest::new("  Photosynthesis \n", 3).unwrap();
        assert_eq!(request.topic(), "Photosynthesis");
        assert_eq!(request.slide_count(), 3);
    }

    #[test]
    fn test_request_rejects_blank_topic() {
        let err = GenerationRequest::new("   ", 3).unwrap_err();
        assert!(matches!(err, SlideDeckError::InvalidRequest(_)));
    }

    #[test]
    fn test_request_rejects_zero_slides() {
        let err = GenerationRequest::new("Volcanoes", 0).unwrap_err();
        assert!(matches!(err, SlideDeckError::InvalidRequest(_)));
    }

    #[test]
    fn test_body_text_joins_lines() {
        let slide = SlideRecord::new(
            "Process",
            vec!["Light reactions".to_string(), "Calvin cycle".to_string()],
        );
        assert_eq!(slide.body_text(), "Light reactions\nCalvin cycle");
        assert!(slide.image_url.is_none());
    }

    #[test]
    fn test_slide_content_schema_names_fields() {
        let schema = schemars::schema_for!(Vec<SlideContent>);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("\"content\""));
    }
}
