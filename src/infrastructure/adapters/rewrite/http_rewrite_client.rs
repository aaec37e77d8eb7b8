//! HTTP Rewrite Client - 调用 OpenAI 兼容的 Chat Completions 接口
//!
//! 外部 API:
//! POST {base_url}/v1/chat/completions
//! Authorization: Bearer {api_key}
//! Request:  {"model": "...", "messages": [...], "temperature": 0.7}
//! Response: {"choices": [{"message": {"content": "..."}}]}
//!
//! 提示词要求模型把正文包在哨兵标记之间，结果交给内容规范化器剥离。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{RewriteEnginePort, RewriteError};
use crate::domain::content_normalizer::{DEFAULT_SENTINEL_END, DEFAULT_SENTINEL_START};

const SYSTEM_PROMPT: &str = "You are an editor for serialized web novels. \
Rewrite the chapter the user sends so it reads naturally and fluently. \
Keep the plot, names and paragraph breaks. Do not add commentary.";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP 改写客户端配置
#[derive(Debug, Clone)]
pub struct HttpRewriteClientConfig {
    /// 服务基础 URL
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl HttpRewriteClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 60,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 改写客户端
pub struct HttpRewriteClient {
    client: Client,
    config: HttpRewriteClientConfig,
}

impl HttpRewriteClient {
    pub fn new(config: HttpRewriteClientConfig) -> Result<Self, RewriteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RewriteError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_request<'a>(&'a self, text: &str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: format!(
                        "{} Wrap the rewritten chapter between {} and {}.",
                        SYSTEM_PROMPT, DEFAULT_SENTINEL_START, DEFAULT_SENTINEL_END
                    ),
                },
                ChatMessage {
                    role: "user",
                    content: text.to_string(),
                },
            ],
            temperature: 0.7,
        }
    }
}

/// 提取第一个候选的文本
fn extract_content(response: ChatResponse) -> Result<String, RewriteError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| RewriteError::InvalidResponse("empty completion".to_string()))
}

#[async_trait]
impl RewriteEnginePort for HttpRewriteClient {
    async fn rewrite(&self, text: &str) -> Result<String, RewriteError> {
        let request = self.build_request(text);

        tracing::debug!(
            url = %self.completions_url(),
            model = %self.config.model,
            text_len = text.len(),
            "Sending rewrite request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RewriteError::Timeout
                } else if e.is_connect() {
                    RewriteError::NetworkError(format!("Cannot connect to rewrite service: {}", e))
                } else {
                    RewriteError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RewriteError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| RewriteError::InvalidResponse(e.to_string()))?;
        let content = extract_content(body)?;

        tracing::info!(
            input_len = text.len(),
            output_len = content.len(),
            "Rewrite completed"
        );

        Ok(content)
    }
}
