use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::info;

use crate::error::{Result, SlideDeckError};
use crate::schema::SlideDeck;

pub const DEFAULT_FILE_NAME: &str = "generated_presentation.pptx";
pub const DEFAULT_IMAGE_FILE_NAME: &str = "generated_image.png";
const DECK_DATA_URI_PREFIX: &str = "data:file/pptx;base64,";
const IMAGE_DATA_URI_PREFIX: &str = "data:file/png;base64,";

/// A saved file plus the browser-displayable link that carries its bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadLink {
    pub path: PathBuf,
    pub file_name: String,
    pub data_uri: String,
    pub label: String,
}

impl DownloadLink {
    pub fn html_anchor(&self) -> String {
        format!(
            "<a href=\"{}\" download=\"{}\">{}</a>",
            self.data_uri,
            escape_attr(&self.file_name),
            escape_attr(&self.label)
        )
    }

    /// A minimal standalone page holding the anchor.
    pub fn html_page(&self, heading: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
            <body>\n<h1>{title}</h1>\n<p>{anchor}</p>\n</body>\n</html>\n",
            title = escape_attr(heading),
            anchor = self.html_anchor()
        )
    }
}

/// Writes the deck to `path`, reads it back and encodes what is on disk.
pub async fn save_deck(deck: &SlideDeck, path: &Path) -> Result<DownloadLink> {
    save_bytes(
        deck.bytes(),
        path,
        DEFAULT_FILE_NAME,
        DECK_DATA_URI_PREFIX,
        "Download Presentation",
    )
    .await
}

/// Same as [`save_deck`] for a single downloaded image.
pub async fn save_image(bytes: &[u8], path: &Path) -> Result<DownloadLink> {
    save_bytes(
        bytes,
        path,
        DEFAULT_IMAGE_FILE_NAME,
        IMAGE_DATA_URI_PREFIX,
        "Download Image",
    )
    .await
}

async fn save_bytes(
    bytes: &[u8],
    path: &Path,
    fallback_name: &str,
    data_uri_prefix: &str,
    label: &str,
) -> Result<DownloadLink> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(path, bytes).await?;
    let written = tokio::fs::read(path).await?;
    if written.len() != bytes.len() {
        return Err(SlideDeckError::Assembly(format!(
            "Short write to {}: expected {} bytes, found {}",
            path.display(),
            bytes.len(),
            written.len()
        )));
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(fallback_name)
        .to_string();

    info!("Saved {} ({} bytes)", path.display(), written.len());

    Ok(DownloadLink {
        path: path.to_path_buf(),
        file_name,
        data_uri: format!("{}{}", data_uri_prefix, STANDARD.encode(&written)),
        label: label.to_string(),
    })
}

fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_roundtrips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decks").join("talk.pptx");
        let deck = SlideDeck::new(Vec::new(), 0, b"PK fake deck".to_vec());

        let link = save_deck(&deck, &path).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"PK fake deck");
        assert_eq!(link.file_name, "talk.pptx");
        assert!(link.data_uri.starts_with("data:file/pptx;base64,"));

        let encoded = link.data_uri.trim_start_matches(DECK_DATA_URI_PREFIX);
        assert_eq!(STANDARD.decode(encoded).unwrap(), b"PK fake deck");
    }

    #[test]
    fn test_anchor_format() {
        let link = DownloadLink {
            path: PathBuf::from("out.pptx"),
            file_name: "out.pptx".to_string(),
            data_uri: "data:file/pptx;base64,AAAA".to_string(),
            label: "Download Presentation".to_string(),
        };
        assert_eq!(
            link.html_anchor(),
            "<a href=\"data:file/pptx;base64,AAAA\" download=\"out.pptx\">Download Presentation</a>"
        );
        assert!(link.html_page("Tea & Cake").contains("<h1>Tea &amp; Cake</h1>"));
    }

    #[tokio::test]
    async fn test_save_image_builds_png_link() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated_image.png");

        let link = save_image(b"\x89PNG fake", &path).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG fake");
        assert!(link.data_uri.starts_with("data:file/png;base64,"));
        let encoded = link.data_uri.trim_start_matches(IMAGE_DATA_URI_PREFIX);
        assert_eq!(STANDARD.decode(encoded).unwrap(), b"\x89PNG fake");
        assert!(link
            .html_anchor()
            .ends_with("download=\"generated_image.png\">Download Image</a>"));
    }
}
