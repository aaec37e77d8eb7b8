//! Repository Ports - 出站端口
//!
//! 定义小说 / 章节存储的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::novel::{Chapter, ChapterId, ChapterSummary, Novel, NovelId, Slug};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// 没有可解析的存储地址
    #[error("Storage is not configured")]
    NotConfigured,

    /// 连接已断开或无法建立
    #[error("Storage connection lost: {0}")]
    ConnectionLost(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl RepositoryError {
    pub fn is_connection_lost(&self) -> bool {
        matches!(self, RepositoryError::ConnectionLost(_))
    }
}

/// Novel Repository Port
///
/// 章节由外部导入流程创建，这里只读取并更新编辑稿，从不删除。
#[async_trait]
pub trait NovelRepositoryPort: Send + Sync {
    /// 按标题排序列出所有小说
    async fn list_novels(&self) -> Result<Vec<Novel>, RepositoryError>;

    /// 根据 slug 查找小说
    async fn find_novel_by_slug(&self, slug: &Slug) -> Result<Option<Novel>, RepositoryError>;

    /// 按 chapter_index 排序列出小说的章节目录
    async fn list_chapters(&self, novel_id: NovelId) -> Result<Vec<ChapterSummary>, RepositoryError>;

    /// 根据小说与章节序号查找章节
    async fn find_chapter(
        &self,
        novel_id: NovelId,
        chapter_index: u32,
    ) -> Result<Option<Chapter>, RepositoryError>;

    /// 根据 ID 获取章节
    async fn get_chapter(&self, id: ChapterId) -> Result<Option<Chapter>, RepositoryError>;

    /// 更新章节编辑稿（单行、后写者胜）
    async fn update_chapter_edit(&self, id: ChapterId, text: &str) -> Result<(), RepositoryError>;

    /// 检查存储是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
