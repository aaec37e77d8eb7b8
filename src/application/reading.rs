//! 阅读用例共享的加载步骤
//!
//! 每次调用都从存储重新读取并重新分页，不缓存上一章的分页结果。

use crate::application::error::ApplicationError;
use crate::application::ports::NovelRepositoryPort;
use crate::domain::novel::{Chapter, ChapterSummary, ContentSource, Novel, NovelId, Slug};
use crate::domain::{paginate, ChapterOutline, ContentNormalizer, NormalizedContent, Pagination};

/// 根据 slug 字符串解析小说
pub(crate) async fn resolve_novel(
    repo: &dyn NovelRepositoryPort,
    slug: &str,
) -> Result<Novel, ApplicationError> {
    let parsed = Slug::new(slug).map_err(|e| ApplicationError::validation(e.to_string()))?;
    repo.find_novel_by_slug(&parsed)
        .await?
        .ok_or_else(|| ApplicationError::not_found("Novel", slug))
}

/// 读取章节目录
pub(crate) async fn load_outline(
    repo: &dyn NovelRepositoryPort,
    novel_id: NovelId,
) -> Result<(Vec<ChapterSummary>, ChapterOutline), ApplicationError> {
    let chapters = repo.list_chapters(novel_id).await?;
    let outline = ChapterOutline::new(chapters.iter().map(|c| c.index).collect());
    Ok((chapters, outline))
}

/// 已分页的章节
pub(crate) struct PaginatedChapter {
    pub chapter: Option<Chapter>,
    pub content: NormalizedContent,
    pub pagination: Pagination,
}

/// 读取章节、规范化并分页
///
/// 章节不存在时返回占位分页。
pub(crate) async fn paginate_chapter(
    repo: &dyn NovelRepositoryPort,
    normalizer: &ContentNormalizer,
    novel_id: NovelId,
    chapter_index: u32,
    words_per_page: usize,
) -> Result<PaginatedChapter, ApplicationError> {
    let chapter = repo.find_chapter(novel_id, chapter_index).await?;
    let content = match &chapter {
        Some(ch) => normalizer.normalize_chapter(ch),
        None => NormalizedContent {
            display: String::new(),
            reference: String::new(),
            source: ContentSource::Raw,
        },
    };
    let pagination = paginate(&content.display, words_per_page);

    Ok(PaginatedChapter {
        chapter,
        content,
        pagination,
    })
}
