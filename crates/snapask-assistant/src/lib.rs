mod chat;

pub use chat::{CHAT_MODEL, ChatAssistant};

/// Chat-completion provider interface
#[async_trait::async_trait]
pub trait Assistant: Send + Sync {
    /// Send `prompt` as a single user message and return the reply
    async fn ask(&self, prompt: &str) -> Result<Reply, AssistantError>;

    /// Model identifier used for requests
    fn model(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Response contained no choices")]
    EmptyResponse,
}
