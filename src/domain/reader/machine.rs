//! 状态迁移

use serde::Serialize;

use super::{ChapterOutline, ReaderPosition};
use crate::domain::novel::NovelId;

/// 导航动作（切换小说需要新小说的目录，单独由 `select_novel` 处理）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    NextPage,
    PrevPage,
    NextChapter,
    PrevChapter,
    SelectChapter(u32),
}

impl NavAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavAction::NextPage => "next_page",
            NavAction::PrevPage => "prev_page",
            NavAction::NextChapter => "next_chapter",
            NavAction::PrevChapter => "prev_chapter",
            NavAction::SelectChapter(_) => "select_chapter",
        }
    }
}

/// 导致动作无效的边界
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    ChapterStart,
    ChapterEnd,
    FirstChapter,
    LastChapter,
    NoChapters,
}

/// 迁移结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Moved,
    /// 位置保持不变
    Unavailable(Boundary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub position: ReaderPosition,
    pub outcome: NavOutcome,
}

impl Navigation {
    fn moved(position: ReaderPosition) -> Self {
        Self {
            position,
            outcome: NavOutcome::Moved,
        }
    }

    fn unavailable(position: ReaderPosition, boundary: Boundary) -> Self {
        Self {
            position,
            outcome: NavOutcome::Unavailable(boundary),
        }
    }

    pub fn is_moved(&self) -> bool {
        self.outcome == NavOutcome::Moved
    }

    /// 下一页无效且停在章末，调用方应改为提示进入下一章
    pub fn reached_chapter_end(&self) -> bool {
        self.outcome == NavOutcome::Unavailable(Boundary::ChapterEnd)
    }
}

impl ReaderPosition {
    /// 切换小说：章节重置为新小说第一章，页码归零
    pub fn select_novel(self, novel_id: NovelId, outline: &ChapterOutline) -> Navigation {
        Navigation::moved(ReaderPosition::start(novel_id, outline))
    }

    /// 切换章节：无效的章节号钳制到最近的有效章节，页码归零
    pub fn select_chapter(self, chapter_index: u32, outline: &ChapterOutline) -> Navigation {
        match outline.nearest(chapter_index) {
            Some(target) => Navigation::moved(Self {
                chapter_index: target,
                page_index: 0,
                ..self
            }),
            None => Navigation::unavailable(self, Boundary::NoChapters),
        }
    }

    pub fn next_page(self, page_count: usize) -> Navigation {
        if self.page_index + 1 < page_count {
            Navigation::moved(Self {
                page_index: self.page_index + 1,
                ..self
            })
        } else {
            Navigation::unavailable(self, Boundary::ChapterEnd)
        }
    }

    pub fn prev_page(self) -> Navigation {
        if self.page_index > 0 {
            Navigation::moved(Self {
                page_index: self.page_index - 1,
                ..self
            })
        } else {
            Navigation::unavailable(self, Boundary::ChapterStart)
        }
    }

    pub fn next_chapter(self, outline: &ChapterOutline) -> Navigation {
        match outline.next_after(self.chapter_index) {
            Some(next) => Navigation::moved(Self {
                chapter_index: next,
                page_index: 0,
                ..self
            }),
            None if outline.is_empty() => Navigation::unavailable(self, Boundary::NoChapters),
            None => Navigation::unavailable(self, Boundary::LastChapter),
        }
    }

    pub fn prev_chapter(self, outline: &ChapterOutline) -> Navigation {
        match outline.prev_before(self.chapter_index) {
            Some(prev) => Navigation::moved(Self {
                chapter_index: prev,
                page_index: 0,
                ..self
            }),
            None if outline.is_empty() => Navigation::unavailable(self, Boundary::NoChapters),
            None => Navigation::unavailable(self, Boundary::FirstChapter),
        }
    }

    /// 应用一个导航动作
    ///
    /// `page_count` 必须来自当前章节的当前分页。
    pub fn apply(self, action: NavAction, outline: &ChapterOutline, page_count: usize) -> Navigation {
        let position = self.clamp_page(page_count);
        match action {
            NavAction::NextPage => position.next_page(page_count),
            NavAction::PrevPage => position.prev_page(),
            NavAction::NextChapter => position.next_chapter(outline),
            NavAction::PrevChapter => position.prev_chapter(outline),
            NavAction::SelectChapter(index) => position.select_chapter(index, outline),
        }
    }
}

/// 当前位置可用的导航
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavAvailability {
    pub prev_page: bool,
    pub next_page: bool,
    pub prev_chapter: bool,
    pub next_chapter: bool,
}

impl NavAvailability {
    pub fn compute(position: &ReaderPosition, outline: &ChapterOutline, page_count: usize) -> Self {
        Self {
            prev_page: position.page_index > 0,
            next_page: position.page_index + 1 < page_count,
            prev_chapter: outline.prev_before(position.chapter_index).is_some(),
            next_chapter: outline.next_after(position.chapter_index).is_some(),
        }
    }

    /// 已到章末（下一页无效）
    pub fn at_chapter_end(&self) -> bool {
        !self.next_page
    }
}
