//! Reader Queries

use crate::domain::ReaderPosition;

/// 打开阅读视图查询
///
/// 地址参数优先；缺失或无效时回退到会话中的位置，再回退到默认值
/// （按标题排序的第一本小说、第一章、第 0 页）。
#[derive(Debug, Clone, Default)]
pub struct OpenReader {
    pub novel: Option<String>,
    pub chapter: Option<u32>,
    pub page: Option<usize>,
    /// 请求显示章末提示
    pub show_end: bool,
    pub words_per_page: usize,
    /// 会话中保存的上次位置
    pub fallback: Option<ReaderPosition>,
}

/// 打开编辑视图查询
#[derive(Debug, Clone)]
pub struct OpenEditor {
    pub slug: String,
    pub chapter_index: u32,
}
