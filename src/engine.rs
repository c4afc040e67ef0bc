use std::path::Path;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::Sender;

use crate::config::{AzureOpenAiConfig, GenerationSettings, ParseFailurePolicy};
use crate::deck::DeckAssembler;
use crate::delivery::{save_deck, save_image, DownloadLink};
use crate::enrichment::{send_event, ImageEnricher, ImageFailure};
use crate::error::{ParseError, Result, SlideDeckError};
use crate::llm::prompts::{slide_prompt, SYSTEM_PROMPT};
use crate::llm::{AzureOpenAiClient, ChatMessage, GenerationEvent};
use crate::parser;
use crate::schema::{GenerationRequest, SlideDeck, SlideRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    Idle,
    Requesting,
    Parsing,
    Enriching,
    Assembling,
    Done,
    Failed,
}

impl PipelineState {
    pub fn can_transition_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Idle, Requesting)
                | (Requesting, Parsing)
                | (Requesting, Failed)
                | (Parsing, Enriching)
                | (Parsing, Failed)
                | (Enriching, Assembling)
                | (Assembling, Done)
                | (Assembling, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub deck: SlideDeck,
    pub raw_reply: String,
    /// Set when the reply could not be parsed and the run continued with zero slides.
    pub parse_error: Option<ParseError>,
    pub image_failures: Vec<ImageFailure>,
    pub state: PipelineState,
}

/// A single illustration saved to disk, with no deck around it.
#[derive(Debug, Clone)]
pub struct ImageOutcome {
    pub url: String,
    pub link: DownloadLink,
}

/// Runs one topic through request, parse, enrichment and assembly.
pub struct SlideDeckGenerator {
    client: AzureOpenAiClient,
    settings: GenerationSettings,
}

impl SlideDeckGenerator {
    /// Fails immediately when the credential is missing.
    pub fn new(config: AzureOpenAiConfig, settings: GenerationSettings) -> Result<Self> {
        Ok(Self::from_client(AzureOpenAiClient::new(config)?, settings))
    }

    pub fn from_client(client: AzureOpenAiClient, settings: GenerationSettings) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
        progress: Option<Sender<GenerationEvent>>,
    ) -> Result<GenerationOutcome> {
        let mut state = PipelineState::Idle;
        info!(
            "Generating {} slides on '{}'",
            request.slide_count(),
            request.topic()
        );

        self.advance(&mut state, PipelineState::Requesting, &progress);
        let raw_reply = match self.request_slides(request).await {
            Ok(reply) => reply,
            Err(e) => return Err(self.fail(&mut state, e, &progress)),
        };

        self.advance(&mut state, PipelineState::Parsing, &progress);
        let (slides, parse_error) = match parser::parse(&raw_reply) {
            Ok(slides) => (slides, None),
            Err(parse_error) => {
                warn!("Model reply could not be parsed: {}", parse_error.reason);
                send_event(
                    &progress,
                    GenerationEvent::ParseFailed {
                        reason: parse_error.reason.clone(),
                        raw_text: parse_error.raw_text.clone(),
                    },
                );

                if self.settings.parse_failure_policy == ParseFailurePolicy::Abort {
                    return Err(self.fail(&mut state, parse_error.into(), &progress));
                }
                (Vec::new(), Some(parse_error))
            }
        };

        if parse_error.is_none() && slides.len() != request.slide_count() as usize {
            warn!(
                "Requested {} slides but the model returned {}",
                request.slide_count(),
                slides.len()
            );
            send_event(
                &progress,
                GenerationEvent::SlideCountMismatch {
                    requested: request.slide_count(),
                    received: slides.len(),
                },
            );
        }

        self.advance(&mut state, PipelineState::Enriching, &progress);
        let (slides, image_failures) = self.enrich(slides, &progress).await;

        self.advance(&mut state, PipelineState::Assembling, &progress);
        let deck = match DeckAssembler::new(&self.client, request.topic())
            .assemble(slides)
            .await
        {
            Ok(deck) => deck,
            Err(e) => return Err(self.fail(&mut state, e, &progress)),
        };

        self.advance(&mut state, PipelineState::Done, &progress);
        send_event(
            &progress,
            GenerationEvent::Finished {
                slides: deck.slide_count(),
                images: deck.embedded_images(),
            },
        );

        Ok(GenerationOutcome {
            deck,
            raw_reply,
            parse_error,
            image_failures,
            state,
        })
    }

    /// Generates a deck and hands it to the delivery step at `path`.
    pub async fn generate_to_file(
        &self,
        request: &GenerationRequest,
        path: &Path,
        progress: Option<Sender<GenerationEvent>>,
    ) -> Result<(GenerationOutcome, DownloadLink)> {
        let outcome = self.generate(request, progress).await?;
        let link = save_deck(&outcome.deck, path).await?;
        Ok((outcome, link))
    }

    /// Generates one image for a free-form prompt, downloads it and saves it as PNG at `path`.
    ///
    /// The prompt is sent verbatim. Unlike enrichment, a failed request is returned as an error.
    pub async fn generate_image_to_file(&self, prompt: &str, path: &Path) -> Result<ImageOutcome> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SlideDeckError::InvalidRequest(
                "image prompt must not be empty".to_string(),
            ));
        }

        info!("Generating a single {} image", self.settings.image_size);
        let url = self
            .client
            .generate_image(prompt, &self.settings.image_size)
            .await?;
        let bytes = self.client.fetch_bytes(&url).await?;
        let link = save_image(&bytes, path).await?;

        Ok(ImageOutcome { url, link })
    }

    async fn request_slides(&self, request: &GenerationRequest) -> Result<String> {
        let messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(slide_prompt(request)?),
        ];

        let reply = self
            .client
            .complete_chat(
                &messages,
                self.settings.max_tokens,
                self.settings.temperature,
                self.settings.top_p,
            )
            .await?;

        debug!("Model reply ({} chars): {}", reply.len(), reply);
        Ok(reply)
    }

    async fn enrich(
        &self,
        slides: Vec<SlideRecord>,
        progress: &Option<Sender<GenerationEvent>>,
    ) -> (Vec<SlideRecord>, Vec<ImageFailure>) {
        if !self.settings.generate_images {
            debug!("Image generation disabled; skipping enrichment");
            return (slides, Vec::new());
        }

        let enriched = ImageEnricher::new(&self.client, self.settings.image_size.as_str())
            .with_concurrency(self.settings.image_concurrency)
            .enrich(slides, progress)
            .await;
        (enriched.slides, enriched.failures)
    }

    fn advance(
        &self,
        state: &mut PipelineState,
        next: PipelineState,
        progress: &Option<Sender<GenerationEvent>>,
    ) {
        debug_assert!(
            state.can_transition_to(next),
            "invalid pipeline transition {:?} -> {:?}",
            state,
            next
        );
        debug!("Pipeline state {:?} -> {:?}", state, next);
        *state = next;
        send_event(progress, GenerationEvent::StateChanged(next));
    }

    fn fail(
        &self,
        state: &mut PipelineState,
        err: SlideDeckError,
        progress: &Option<Sender<GenerationEvent>>,
    ) -> SlideDeckError {
        error!("Generation failed while {:?}: {}", state, err);
        self.advance(state, PipelineState::Failed, progress);
        send_event(
            progress,
            GenerationEvent::Failed {
                reason: err.to_string(),
            },
        );
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        use PipelineState::*;
        let path = [Idle, Requesting, Parsing, Enriching, Assembling, Done];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{:?}", pair);
        }
        assert!(Done.is_terminal());
    }

    #[test]
    fn test_failure_transitions() {
        use PipelineState::*;
        assert!(Requesting.can_transition_to(Failed));
        assert!(Parsing.can_transition_to(Failed));
        assert!(Assembling.can_transition_to(Failed));
        assert!(!Idle.can_transition_to(Failed));
        assert!(!Enriching.can_transition_to(Failed));
        assert!(!Done.can_transition_to(Requesting));
        assert!(Failed.is_terminal());
    }

    #[test]
    fn test_new_fails_fast_without_key() {
        let result =
            SlideDeckGenerator::new(AzureOpenAiConfig::default(), GenerationSettings::default());
        assert!(matches!(result, Err(SlideDeckError::Config(_))));
    }

    #[tokio::test]
    async fn test_blank_image_prompt_is_rejected() {
        let generator = SlideDeckGenerator::new(
            AzureOpenAiConfig::default().with_api_key("test-key"),
            GenerationSettings::default(),
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated_image.png");

        let err = generator
            .generate_image_to_file("  \n", &path)
            .await
            .unwrap_err();

        assert!(matches!(err, SlideDeckError::InvalidRequest(_)));
        assert!(!path.exists());
    }
}
