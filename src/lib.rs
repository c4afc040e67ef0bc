//! # Slide Deck Builder
//!
//! Turns a topic and a slide count into a PowerPoint deck using Azure OpenAI.
//!
//! ## Pipeline
//!
//! - **Request**: the chat deployment is asked for a JSON array of `{title, content}` objects
//! - **Parse**: the reply is treated as untrusted text and decoded into [`SlideRecord`]s
//! - **Enrich**: each slide gets one generated illustration; a failed image only affects its slide
//! - **Assemble**: slides are laid out into a `.pptx` package, downloading each image on the way
//!
//! ## Example
//!
//! ```rust,ignore
//! use slide_deck_builder::*;
//!
//! let config = AzureOpenAiConfig::from_env();
//! let generator = SlideDeckGenerator::new(config, GenerationSettings::default())?;
//!
//! let request = GenerationRequest::new("Photosynthesis", 3)?;
//! let outcome = generator.generate(&request, None).await?;
//!
//! std::fs::write("photosynthesis.pptx", outcome.deck.bytes())?;
//! ```

pub mod config;
pub mod deck;
pub mod delivery;
pub mod engine;
pub mod enrichment;
pub mod error;
pub mod llm;
pub mod parser;
pub mod schema;

pub use config::{AzureOpenAiConfig, GenerationSettings, ParseFailurePolicy};
pub use deck::DeckAssembler;
pub use delivery::{save_deck, save_image, DownloadLink};
pub use engine::{GenerationOutcome, ImageOutcome, PipelineState, SlideDeckGenerator};
pub use enrichment::{EnrichedSlides, ImageEnricher, ImageFailure};
pub use error::{ParseError, Result, SlideDeckError};
pub use llm::{AzureOpenAiClient, GenerationEvent};
pub use parser::parse;
pub use schema::{GenerationRequest, SlideContent, SlideDeck, SlideRecord};
