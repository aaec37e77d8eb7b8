//! Rewrite Engine Port - AI 改写服务抽象
//!
//! 纯文本进、纯文本出。未配置凭据时功能禁用，而不是启动失败。

use async_trait::async_trait;
use thiserror::Error;

/// 改写错误
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("Rewrite is disabled: no credentials configured")]
    Disabled,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Rewrite Engine Port
#[async_trait]
pub trait RewriteEnginePort: Send + Sync {
    /// 改写一段纯文本，返回修订后的文本
    async fn rewrite(&self, text: &str) -> Result<String, RewriteError>;

    /// 功能是否可用（是否配置了凭据）
    fn is_available(&self) -> bool {
        true
    }
}
