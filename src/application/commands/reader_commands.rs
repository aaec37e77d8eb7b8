//! Reader Commands

use crate::domain::{NavAction, ReaderPosition};

/// 导航命令
///
/// 位置来自地址参数；页码按当前章节、当前分页预算重新钳制后再迁移。
#[derive(Debug, Clone)]
pub struct Navigate {
    pub slug: String,
    pub chapter_index: u32,
    pub page_index: usize,
    pub action: NavAction,
    pub words_per_page: usize,
}

/// 切换小说命令
#[derive(Debug, Clone)]
pub struct SelectNovel {
    pub slug: String,
    /// 切换前的位置（可能属于另一本小说）
    pub current: Option<ReaderPosition>,
}
