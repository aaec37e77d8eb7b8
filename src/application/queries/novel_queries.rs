//! Novel Queries

/// 列出所有小说查询
#[derive(Debug, Clone)]
pub struct ListNovels;

/// 获取小说章节目录查询
#[derive(Debug, Clone)]
pub struct ListChapters {
    pub slug: String,
}

/// 获取章节分页查询（客户端本地展示单元的数据源）
#[derive(Debug, Clone)]
pub struct GetChapterPages {
    pub slug: String,
    pub chapter_index: u32,
    pub words_per_page: usize,
}
