use serde::{Deserialize, Serialize};

use crate::error::{Result, SlideDeckError};

pub const DEFAULT_ENDPOINT: &str = "https://aoai-d01.openai.azure.com/";
pub const DEFAULT_CHAT_DEPLOYMENT: &str = "gpt-4o";
pub const DEFAULT_IMAGE_DEPLOYMENT: &str = "dall-e-3";
pub const DEFAULT_API_VERSION: &str = "2024-05-01-preview";
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

pub const ENV_ENDPOINT: &str = "ENDPOINT_URL";
pub const ENV_CHAT_DEPLOYMENT: &str = "DEPLOYMENT_NAME";
pub const ENV_IMAGE_DEPLOYMENT: &str = "DALL_E_DEPLOYMENT_NAME";
pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_API_VERSION: &str = "OPENAI_API_VERSION";

/// Connection settings for the Azure OpenAI resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AzureOpenAiConfig {
    pub endpoint: String,
    pub chat_deployment: String,
    pub image_deployment: String,
    pub api_key: Option<String>,
    pub api_version: String,
}

impl Default for AzureOpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            chat_deployment: DEFAULT_CHAT_DEPLOYMENT.to_string(),
            image_deployment: DEFAULT_IMAGE_DEPLOYMENT.to_string(),
            api_key: None,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl AzureOpenAiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            endpoint: read(ENV_ENDPOINT).unwrap_or(defaults.endpoint),
            chat_deployment: read(ENV_CHAT_DEPLOYMENT).unwrap_or(defaults.chat_deployment),
            image_deployment: read(ENV_IMAGE_DEPLOYMENT).unwrap_or(defaults.image_deployment),
            api_key: read(ENV_API_KEY),
            api_version: read(ENV_API_VERSION).unwrap_or(defaults.api_version),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(SlideDeckError::Config(format!(
                "{} is not set; refusing to call the API without a credential",
                ENV_API_KEY
            ))),
        }
    }

    pub(crate) fn chat_completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.chat_deployment,
            self.api_version
        )
    }

    pub(crate) fn image_generations_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/images/generations?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.image_deployment,
            self.api_version
        )
    }
}

/// What to do when the model reply cannot be parsed into slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParseFailurePolicy {
    /// Keep going with zero slides and hand back an empty deck.
    #[default]
    ContinueWithEmptyDeck,
    /// Stop the run and report the parse error.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub image_size: String,
    /// Number of image requests in flight at once. 1 means strictly sequential.
    pub image_concurrency: usize,
    pub generate_images: bool,
    pub parse_failure_policy: ParseFailurePolicy,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 800,
            temperature: 0.7,
            top_p: 0.95,
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            image_concurrency: 1,
            generate_images: true,
            parse_failure_policy: ParseFailurePolicy::default(),
        }
    }
}
