//! 阅读位置

use serde::{Deserialize, Serialize};

use super::ChapterOutline;
use crate::domain::novel::NovelId;

/// 阅读位置
///
/// 不变量:
/// - page_index 在当前章节当前分页的 `[0, page_count - 1]` 内（由 `clamp_page` 维护）
/// - 切换章节或小说时 page_index 归零
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderPosition {
    pub novel_id: NovelId,
    pub chapter_index: u32,
    pub page_index: usize,
}

impl ReaderPosition {
    /// 小说的起始位置：第一章第 0 页
    ///
    /// 没有章节的小说 chapter_index 取 0，由调用方展示"暂无章节"。
    pub fn start(novel_id: NovelId, outline: &ChapterOutline) -> Self {
        Self {
            novel_id,
            chapter_index: outline.first().unwrap_or(0),
            page_index: 0,
        }
    }

    /// 分页宽度变化等原因导致页码漂移时，钳制到最后一页
    pub fn clamp_page(self, page_count: usize) -> Self {
        Self {
            page_index: self.page_index.min(page_count.saturating_sub(1)),
            ..self
        }
    }
}
