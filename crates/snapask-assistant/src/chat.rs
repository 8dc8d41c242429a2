use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use snapask_config::Config;

use crate::{Assistant, AssistantError, Reply};

pub const CHAT_MODEL: &str = "gpt-4";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible `/chat/completions` client
#[derive(Clone)]
pub struct ChatAssistant {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl ChatAssistant {
    pub fn new(api_key: String, api_base: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_base,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api.openai_api_key.clone(),
            config.api.openai_api_base.clone(),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl Assistant for ChatAssistant {
    async fn ask(&self, prompt: &str) -> Result<Reply, AssistantError> {
        let request = ChatRequest {
            model: CHAT_MODEL,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let endpoint = self.endpoint();
        tracing::debug!("POST {} ({} prompt chars)", endpoint, prompt.chars().count());

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(AssistantError::RateLimitExceeded),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AssistantError::AuthenticationError);
            }
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(AssistantError::ApiError(format!("HTTP {status}: {body}")));
            }
            _ => {}
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::ApiError(format!("Failed to parse response: {e}")))?;

        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AssistantError::EmptyResponse)?;

        Ok(Reply {
            text,
            model: CHAT_MODEL.to_string(),
        })
    }

    fn model(&self) -> &str {
        CHAT_MODEL
    }
}
