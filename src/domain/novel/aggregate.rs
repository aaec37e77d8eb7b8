//! Novel Context - Aggregate Root

use serde::{Deserialize, Serialize};

use super::{NovelError, NovelId, Slug};

/// Novel 聚合根
///
/// 不变量:
/// - slug 全局唯一（由存储层的 UNIQUE 约束保证）
/// - 章节按 chapter_index 排序，允许有间隔
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Novel {
    id: NovelId,
    title: String,
    slug: Slug,
}

impl Novel {
    pub fn new(id: NovelId, title: impl Into<String>, slug: Slug) -> Result<Self, NovelError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(NovelError::InvalidTitle(title));
        }
        Ok(Self { id, title, slug })
    }

    pub fn id(&self) -> NovelId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }
}
