use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::Sender;

use crate::error::Result;
use crate::llm::prompts::image_prompt;
use crate::llm::{AzureOpenAiClient, GenerationEvent};
use crate::schema::SlideRecord;

/// A slide whose illustration could not be generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFailure {
    pub index: usize,
    pub title: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct EnrichedSlides {
    pub slides: Vec<SlideRecord>,
    pub failures: Vec<ImageFailure>,
}

/// Attaches one generated image URL to every slide.
///
/// Each slide is handled independently: a failed request leaves that slide's `image_url`
/// as `None` and never aborts the others. Output order always matches input order.
pub struct ImageEnricher<'a> {
    client: &'a AzureOpenAiClient,
    image_size: String,
    concurrency: usize,
}

impl<'a> ImageEnricher<'a> {
    pub fn new(client: &'a AzureOpenAiClient, image_size: impl Into<String>) -> Self {
        Self {
            client,
            image_size: image_size.into(),
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` image requests in flight. Values below 1 mean sequential.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn enrich(
        &self,
        slides: Vec<SlideRecord>,
        progress: &Option<Sender<GenerationEvent>>,
    ) -> EnrichedSlides {
        let total = slides.len();
        info!(
            "Requesting {} images ({} at a time)",
            total, self.concurrency
        );

        // `buffered` yields results in submission order regardless of completion order.
        let results: Vec<Result<String>> = stream::iter(slides.iter().enumerate())
            .map(|(index, slide)| self.request_image(index, total, slide, progress))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut failures = Vec::new();
        let slides = slides
            .into_iter()
            .zip(results)
            .enumerate()
            .map(|(index, (mut slide, result))| {
                slide.image_url = match result {
                    Ok(url) => Some(url),
                    Err(e) => {
                        failures.push(ImageFailure {
                            index,
                            title: slide.title.clone(),
                            reason: e.to_string(),
                        });
                        None
                    }
                };
                slide
            })
            .collect();

        for failure in &failures {
            send_event(
                progress,
                GenerationEvent::ImageFailed {
                    index: failure.index,
                    title: failure.title.clone(),
                    reason: failure.reason.clone(),
                },
            );
        }

        EnrichedSlides { slides, failures }
    }

    async fn request_image(
        &self,
        index: usize,
        total: usize,
        slide: &SlideRecord,
        progress: &Option<Sender<GenerationEvent>>,
    ) -> Result<String> {
        send_event(progress, GenerationEvent::ImageRequested { index, total });

        let prompt = image_prompt(&slide.title);
        let result = self.client.generate_image(&prompt, &self.image_size).await;

        if let Err(e) = &result {
            warn!(
                "Image generation failed for slide {} ('{}'): {}",
                index + 1,
                slide.title,
                e
            );
        }

        result
    }
}

/// Never waits on the receiver; events that do not fit in the channel are dropped.
pub(crate) fn send_event(sender: &Option<Sender<GenerationEvent>>, event: GenerationEvent) {
    let Some(tx) = sender else {
        return;
    };
    match tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            debug!("Progress channel full, dropping event: {:?}", event)
        }
        Err(TrySendError::Closed(_)) => {}
    }
}
