//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{RepositoryError, RewriteError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 没有可解析的存储地址
    #[error("Storage is not configured")]
    NotConfigured,

    /// 存储连接断开
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// 目录为空
    #[error("No novels available")]
    EmptyCatalog,

    /// 功能未启用
    #[error("Feature disabled: {0}")]
    FeatureDisabled(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// 可通过重建连接并重跑请求恢复
    pub fn is_connection_lost(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotConfigured => Self::NotConfigured,
            RepositoryError::ConnectionLost(msg) => Self::StorageUnavailable(msg),
            RepositoryError::NotFound(msg) => Self::NotFound {
                resource_type: "Entity",
                id: msg,
            },
            other => Self::RepositoryError(other.to_string()),
        }
    }
}

impl From<RewriteError> for ApplicationError {
    fn from(err: RewriteError) -> Self {
        match err {
            RewriteError::Disabled => Self::FeatureDisabled(err.to_string()),
            other => Self::ExternalServiceError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_lost_is_recoverable() {
        let err = ApplicationError::from(RepositoryError::ConnectionLost("closed".into()));
        assert!(err.is_connection_lost());
        assert!(!ApplicationError::from(RepositoryError::NotConfigured).is_connection_lost());
    }

    #[test]
    fn test_rewrite_disabled_maps_to_feature_disabled() {
        let err = ApplicationError::from(RewriteError::Disabled);
        assert!(matches!(err, ApplicationError::FeatureDisabled(_)));
        let err = ApplicationError::from(RewriteError::Timeout);
        assert!(matches!(err, ApplicationError::ExternalServiceError(_)));
    }
}
