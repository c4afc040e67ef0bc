use thiserror::Error;

/// The model reply could not be decoded into slide records.
///
/// The raw reply is kept so the caller can show the user what the model actually said.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Could not parse slides from model reply: {reason}")]
pub struct ParseError {
    pub reason: String,
    pub raw_text: String,
}

impl ParseError {
    pub fn new(reason: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            raw_text: raw_text.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SlideDeckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid generation request: {0}")]
    InvalidRequest(String),

    #[error("Text generation request failed: {0}")]
    Request(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Image generation failed: {0}")]
    ImageGeneration(String),

    #[error("Failed to fetch image from {url}: {reason}")]
    ImageFetch { url: String, reason: String },

    #[error("Deck assembly failed: {0}")]
    Assembly(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, SlideDeckError>;
