//! Session Store Port - 阅读会话
//!
//! 每个浏览器一份会话，保存最后的阅读位置与展示偏好。
//! 会话只在请求边界被读取 / 写回，状态机本身不接触它。

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::ReaderPreferences;
use crate::domain::ReaderPosition;

/// Session 错误
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session already exists: {0}")]
    AlreadyExists(String),
}

/// 阅读会话（in-memory）
#[derive(Debug, Clone)]
pub struct ReaderSession {
    pub id: String,
    pub position: Option<ReaderPosition>,
    pub preferences: ReaderPreferences,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl ReaderSession {
    pub fn new(preferences: ReaderPreferences) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            position: None,
            preferences,
            created_at: now,
            last_activity: now,
        }
    }
}

/// Session Store Port
pub trait SessionStorePort: Send + Sync {
    /// 创建新会话
    fn create(&self, session: ReaderSession) -> Result<String, SessionError>;

    /// 获取会话
    fn get(&self, id: &str) -> Result<ReaderSession, SessionError>;

    /// 保存阅读位置
    fn save_position(&self, id: &str, position: ReaderPosition) -> Result<(), SessionError>;

    /// 保存展示偏好
    fn save_preferences(&self, id: &str, preferences: ReaderPreferences) -> Result<(), SessionError>;

    /// 关闭会话
    fn close(&self, id: &str) -> Result<(), SessionError>;

    /// 获取所有过期会话的 ID
    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String>;

    /// 会话数量
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
