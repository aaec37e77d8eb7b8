//! Disabled Rewrite Client - 未配置凭据时使用
//!
//! 改写入口仍然展示，但调用时直接返回 `Disabled`。

use async_trait::async_trait;

use crate::application::ports::{RewriteEnginePort, RewriteError};

pub struct DisabledRewriteClient;

#[async_trait]
impl RewriteEnginePort for DisabledRewriteClient {
    async fn rewrite(&self, _text: &str) -> Result<String, RewriteError> {
        Err(RewriteError::Disabled)
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_disabled() {
        let client = DisabledRewriteClient;
        assert!(!client.is_available());
        assert!(matches!(
            client.rewrite("text").await,
            Err(RewriteError::Disabled)
        ));
    }
}
