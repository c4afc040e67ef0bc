use crate::config::AzureOpenAiConfig;
use crate::error::{Result, SlideDeckError};
use crate::llm::types::*;
use log::debug;
use reqwest::{Client, Response};

/// Thin client over the Azure OpenAI REST surface used by the pipeline.
#[derive(Clone)]
pub struct AzureOpenAiClient {
    client: Client,
    api_key: String,
    config: AzureOpenAiConfig,
}

impl AzureOpenAiClient {
    /// Fails with a configuration error when no credential is available.
    pub fn new(config: AzureOpenAiConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        Ok(Self {
            client: Client::new(),
            api_key,
            config,
        })
    }

    pub fn config(&self) -> &AzureOpenAiConfig {
        &self.config
    }

    /// Sends one non-streaming chat completion and returns the first choice's text.
    pub async fn complete_chat(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
        top_p: f32,
    ) -> Result<String> {
        let payload = ChatCompletionRequest {
            messages,
            max_tokens,
            temperature,
            top_p,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stream: false,
        };

        let res = self
            .client
            .post(self.config.chat_completions_url())
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SlideDeckError::Request(e.to_string()))?;

        let res = check_status(res, SlideDeckError::Request).await?;

        let body: ChatCompletionResponse = res
            .json()
            .await
            .map_err(|e| SlideDeckError::Request(format!("Malformed completion body: {}", e)))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SlideDeckError::Request("No choices returned".to_string()))?;

        if let Some(reason) = &choice.finish_reason {
            debug!("Chat completion finished with reason: {}", reason);
        }

        choice
            .message
            .content
            .ok_or_else(|| SlideDeckError::Request("Model returned no text content".to_string()))
    }

    /// Requests one image and returns the URL it can be downloaded from.
    pub async fn generate_image(&self, prompt: &str, size: &str) -> Result<String> {
        let payload = ImageGenerationRequest { prompt, n: 1, size };

        let res = self
            .client
            .post(self.config.image_generations_url())
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SlideDeckError::ImageGeneration(e.to_string()))?;

        let res = check_status(res, SlideDeckError::ImageGeneration).await?;

        let body: ImageGenerationResponse = res.json().await.map_err(|e| {
            SlideDeckError::ImageGeneration(format!("Malformed image response: {}", e))
        })?;

        let image = body.data.into_iter().next().ok_or_else(|| {
            SlideDeckError::ImageGeneration("Empty image data list".to_string())
        })?;

        if let Some(revised) = &image.revised_prompt {
            debug!("Image prompt revised by service: {}", revised);
        }

        image
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| SlideDeckError::ImageGeneration("No image URL returned".to_string()))
    }

    /// Plain GET for the bytes behind an image URL. No credential is sent.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let fetch_error = |reason: String| SlideDeckError::ImageFetch {
            url: url.to_string(),
            reason,
        };

        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(fetch_error(format!("status {}", status)));
        }

        let bytes = res.bytes().await.map_err(|e| fetch_error(e.to_string()))?;
        if bytes.is_empty() {
            return Err(fetch_error("empty body".to_string()));
        }

        Ok(bytes.to_vec())
    }
}

async fn check_status<F>(res: Response, wrap: F) -> Result<Response>
where
    F: Fn(String) -> SlideDeckError,
{
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let err_text = res.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ApiErrorEnvelope>(&err_text) {
        Ok(envelope) => match envelope.error.code {
            Some(code) => format!("{}: {}", code, envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => err_text,
    };

    Err(wrap(format!("Azure OpenAI error (status {}): {}", status, detail)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> AzureOpenAiClient {
        let config = AzureOpenAiConfig::default()
            .with_endpoint(server.url())
            .with_api_key("test-key");
        AzureOpenAiClient::new(config).unwrap()
    }

    #[test]
    fn test_new_requires_api_key() {
        let result = AzureOpenAiClient::new(AzureOpenAiConfig::default());
        assert!(matches!(result, Err(SlideDeckError::Config(_))));
    }

    #[tokio::test]
    async fn test_complete_chat_returns_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                Matcher::Regex(r"^/openai/deployments/gpt-4o/chat/completions".to_string()),
            )
            .match_header("api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"[]"},"finish_reason":"stop"}]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let text = client
            .complete_chat(&[ChatMessage::user("hi")], 800, 0.7, 0.95)
            .await
            .unwrap();

        assert_eq!(text, "[]");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_chat_surfaces_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                Matcher::Regex(r"^/openai/deployments/gpt-4o/chat/completions".to_string()),
            )
            .with_status(401)
            .with_body(r#"{"error":{"code":"401","message":"Access denied"}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .complete_chat(&[ChatMessage::user("hi")], 800, 0.7, 0.95)
            .await
            .unwrap_err();

        match err {
            SlideDeckError::Request(msg) => assert!(msg.contains("Access denied")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_image_returns_url() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                Matcher::Regex(r"^/openai/deployments/dall-e-3/images/generations".to_string()),
            )
            .match_body(Matcher::PartialJsonString(
                r#"{"n":1,"size":"1024x1024"}"#.to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"created":1,"data":[{"url":"https://img.example/1.png"}]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let url = client.generate_image("a cat", "1024x1024").await.unwrap();
        assert_eq!(url, "https://img.example/1.png");
    }

    #[tokio::test]
    async fn test_generate_image_rejects_empty_data() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                Matcher::Regex(r"^/openai/deployments/dall-e-3/images/generations".to_string()),
            )
            .with_status(200)
            .with_body(r#"{"created":1,"data":[]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.generate_image("a cat", "1024x1024").await.unwrap_err();
        assert!(matches!(err, SlideDeckError::ImageGeneration(_)));
    }

    #[tokio::test]
    async fn test_fetch_bytes_reports_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing.png")
            .with_status(404)
            .create_async()
            .await;

        let client = client_for(&server);
        let url = format!("{}/missing.png", server.url());
        let err = client.fetch_bytes(&url).await.unwrap_err();
        match err {
            SlideDeckError::ImageFetch { url: failed, reason } => {
                assert_eq!(failed, url);
                assert!(reason.contains("404"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
