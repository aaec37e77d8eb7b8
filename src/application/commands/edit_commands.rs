//! Edit Commands

/// 保存章节编辑文本（单行覆盖写，后写者胜）
#[derive(Debug, Clone)]
pub struct SaveChapterEdit {
    pub slug: String,
    pub chapter_index: u32,
    pub text: String,
}

/// AI 改写章节
///
/// 成功后结果作为编辑文本保存；失败时不写入任何内容。
#[derive(Debug, Clone)]
pub struct RewriteChapter {
    pub slug: String,
    pub chapter_index: u32,
}
