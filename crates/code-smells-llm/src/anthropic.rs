use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ClientError, ModelClient};

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Output-length cap for one analysis
const MAX_TOKENS: usize = 4000;

/// Anthropic Messages API client.
///
/// Decoding is deterministic (temperature 0) so the same diff produces the
/// same analysis. One request per invocation; no retries, no streaming.
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: usize,
    temperature: f32,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl<'a> MessagesRequest<'a> {
    fn for_prompt(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            max_tokens: MAX_TOKENS,
            temperature: 0.0,
            messages: vec![RequestMessage {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    fn name(&self) -> &str {
        "Anthropic"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ClientError> {
        let request = MessagesRequest::for_prompt(&self.model, prompt);

        debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending analysis request"
        );

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: MessagesResponse = response.json().await?;

        body.content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
            .ok_or(ClientError::EmptyResponse)
    }
}
