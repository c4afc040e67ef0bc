use log::{debug, info};

use crate::deck::ooxml::{EmbeddedImage, PackageWriter, SlidePart};
use crate::error::{Result, SlideDeckError};
use crate::llm::AzureOpenAiClient;
use crate::schema::{SlideDeck, SlideRecord};

/// Lays out enriched slides into a presentation package.
///
/// Every present `image_url` is downloaded while the deck is built. A download failure aborts
/// the whole assembly; no partial deck is returned.
pub struct DeckAssembler<'a> {
    client: &'a AzureOpenAiClient,
    title: String,
}

impl<'a> DeckAssembler<'a> {
    pub fn new(client: &'a AzureOpenAiClient, title: impl Into<String>) -> Self {
        Self {
            client,
            title: title.into(),
        }
    }

    pub async fn assemble(&self, slides: Vec<SlideRecord>) -> Result<SlideDeck> {
        info!("Assembling deck '{}' with {} slides", self.title, slides.len());

        let mut images: Vec<Option<EmbeddedImage>> = Vec::with_capacity(slides.len());
        for (idx, slide) in slides.iter().enumerate() {
            let image = match &slide.image_url {
                Some(url) => {
                    debug!("Fetching image for slide {}", idx + 1);
                    let bytes = self.client.fetch_bytes(url).await?;
                    Some(EmbeddedImage::new(bytes, url))
                }
                None => None,
            };
            images.push(image);
        }

        let parts: Vec<SlidePart<'_>> = slides
            .iter()
            .zip(&images)
            .map(|(record, image)| SlidePart {
                record,
                image: image.as_ref(),
            })
            .collect();

        let bytes = PackageWriter::new(self.title.as_str())
            .write(&parts)
            .map_err(|e| match e {
                SlideDeckError::Assembly(_) => e,
                other => SlideDeckError::Assembly(other.to_string()),
            })?;

        let embedded = images.iter().filter(|i| i.is_some()).count();
        Ok(SlideDeck::new(slides, embedded, bytes))
    }
}
