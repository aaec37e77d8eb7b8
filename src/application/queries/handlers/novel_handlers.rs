//! Novel Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::NovelRepositoryPort;
use crate::application::queries::{GetChapterPages, ListChapters, ListNovels};
use crate::application::reading::{load_outline, paginate_chapter, resolve_novel};
use crate::domain::novel::{ChapterSummary, ContentSource, Novel};
use crate::domain::{ContentNormalizer, Pagination};

// ============================================================================
// Response DTOs
// ============================================================================

/// 章节目录响应
#[derive(Debug, Clone)]
pub struct ChapterListResponse {
    pub novel: Novel,
    pub chapters: Vec<ChapterSummary>,
}

/// 章节分页响应
#[derive(Debug, Clone)]
pub struct ChapterPagesResponse {
    pub novel: Novel,
    pub chapter: ChapterSummary,
    pub source: ContentSource,
    pub pagination: Pagination,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListNovels Handler
pub struct ListNovelsHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
}

impl ListNovelsHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>) -> Self {
        Self { novel_repo }
    }

    pub async fn handle(&self, _query: ListNovels) -> Result<Vec<Novel>, ApplicationError> {
        Ok(self.novel_repo.list_novels().await?)
    }
}

/// ListChapters Handler
pub struct ListChaptersHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
}

impl ListChaptersHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>) -> Self {
        Self { novel_repo }
    }

    pub async fn handle(&self, query: ListChapters) -> Result<ChapterListResponse, ApplicationError> {
        let novel = resolve_novel(self.novel_repo.as_ref(), &query.slug).await?;
        let (chapters, _) = load_outline(self.novel_repo.as_ref(), novel.id()).await?;
        Ok(ChapterListResponse { novel, chapters })
    }
}

/// GetChapterPages Handler
pub struct GetChapterPagesHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    normalizer: Arc<ContentNormalizer>,
}

impl GetChapterPagesHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>, normalizer: Arc<ContentNormalizer>) -> Self {
        Self {
            novel_repo,
            normalizer,
        }
    }

    pub async fn handle(
        &self,
        query: GetChapterPages,
    ) -> Result<ChapterPagesResponse, ApplicationError> {
        let novel = resolve_novel(self.novel_repo.as_ref(), &query.slug).await?;
        let paginated = paginate_chapter(
            self.novel_repo.as_ref(),
            &self.normalizer,
            novel.id(),
            query.chapter_index,
            query.words_per_page,
        )
        .await?;

        let chapter = paginated
            .chapter
            .as_ref()
            .map(|c| c.summary())
            .ok_or_else(|| {
                ApplicationError::not_found(
                    "Chapter",
                    format!("{}#{}", query.slug, query.chapter_index),
                )
            })?;

        Ok(ChapterPagesResponse {
            novel,
            chapter,
            source: paginated.content.source,
            pagination: paginated.pagination,
        })
    }
}
