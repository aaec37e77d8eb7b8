//! Reader Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{NovelRepositoryPort, ReaderView, RewriteEnginePort};
use crate::application::queries::{OpenEditor, OpenReader};
use crate::application::reading::{load_outline, paginate_chapter, resolve_novel};
use crate::domain::novel::{ChapterId, ChapterSummary, ContentSource, Novel};
use crate::domain::{ContentNormalizer, NavAvailability, ReaderPosition};

/// OpenReader Handler
///
/// 每次请求都重新读取目录、重新规范化并分页。
pub struct OpenReaderHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    normalizer: Arc<ContentNormalizer>,
}

impl OpenReaderHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>, normalizer: Arc<ContentNormalizer>) -> Self {
        Self {
            novel_repo,
            normalizer,
        }
    }

    pub async fn handle(&self, query: OpenReader) -> Result<ReaderView, ApplicationError> {
        let novels = self.novel_repo.list_novels().await?;
        if novels.is_empty() {
            return Err(ApplicationError::EmptyCatalog);
        }

        let fallback = query.fallback;
        let novel = query
            .novel
            .as_deref()
            .and_then(|slug| novels.iter().find(|n| n.slug().as_str() == slug))
            .or_else(|| {
                fallback.and_then(|pos| novels.iter().find(|n| n.id() == pos.novel_id))
            })
            .unwrap_or(&novels[0])
            .clone();

        let (chapters, outline) = load_outline(self.novel_repo.as_ref(), novel.id()).await?;
        let same_novel = fallback.filter(|pos| pos.novel_id == novel.id());

        let chapter_index = query
            .chapter
            .or_else(|| same_novel.map(|pos| pos.chapter_index))
            .and_then(|index| outline.nearest(index))
            .unwrap_or_else(|| ReaderPosition::start(novel.id(), &outline).chapter_index);

        let page_index = query
            .page
            .or_else(|| {
                same_novel
                    .filter(|pos| pos.chapter_index == chapter_index)
                    .map(|pos| pos.page_index)
            })
            .unwrap_or(0);

        let paginated = paginate_chapter(
            self.novel_repo.as_ref(),
            &self.normalizer,
            novel.id(),
            chapter_index,
            query.words_per_page,
        )
        .await?;

        let position = ReaderPosition {
            novel_id: novel.id(),
            chapter_index,
            page_index,
        }
        .clamp_page(paginated.pagination.page_count());

        let availability =
            NavAvailability::compute(&position, &outline, paginated.pagination.page_count());
        let chapter = chapters.iter().find(|c| c.index == chapter_index).cloned();

        tracing::debug!(
            novel = %novel.slug(),
            chapter = chapter_index,
            page = position.page_index,
            page_count = paginated.pagination.page_count(),
            source = paginated.content.source.as_str(),
            "Reader view resolved"
        );

        Ok(ReaderView {
            novels,
            novel,
            chapters,
            chapter,
            pagination: paginated.pagination,
            position,
            availability,
            show_chapter_end: query.show_end && availability.at_chapter_end(),
            source: paginated.content.source,
        })
    }
}

/// 编辑视图
#[derive(Debug, Clone)]
pub struct EditorView {
    pub novel: Novel,
    pub chapter: ChapterSummary,
    pub chapter_id: ChapterId,
    /// 可编辑文本（当前权威文本）
    pub display: String,
    /// 只读参考文本
    pub reference: String,
    pub source: ContentSource,
    pub rewrite_available: bool,
}

/// OpenEditor Handler
pub struct OpenEditorHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    rewrite_engine: Arc<dyn RewriteEnginePort>,
    normalizer: Arc<ContentNormalizer>,
}

impl OpenEditorHandler {
    pub fn new(
        novel_repo: Arc<dyn NovelRepositoryPort>,
        rewrite_engine: Arc<dyn RewriteEnginePort>,
        normalizer: Arc<ContentNormalizer>,
    ) -> Self {
        Self {
            novel_repo,
            rewrite_engine,
            normalizer,
        }
    }

    pub async fn handle(&self, query: OpenEditor) -> Result<EditorView, ApplicationError> {
        let novel = resolve_novel(self.novel_repo.as_ref(), &query.slug).await?;
        let chapter = self
            .novel_repo
            .find_chapter(novel.id(), query.chapter_index)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(
                    "Chapter",
                    format!("{}#{}", query.slug, query.chapter_index),
                )
            })?;

        let content = self.normalizer.normalize_chapter(&chapter);

        Ok(EditorView {
            novel,
            chapter: chapter.summary(),
            chapter_id: chapter.id,
            display: content.display,
            reference: content.reference,
            source: content.source,
            rewrite_available: self.rewrite_engine.is_available(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::rewrite::DisabledRewriteClient;
    use crate::infrastructure::persistence::sqlite::test_support::{memory_repository, seed_demo};

    async fn handler() -> (OpenReaderHandler, Arc<dyn NovelRepositoryPort>) {
        let (db, repo) = memory_repository().await;
        let pool = db.pool().await.unwrap();
        seed_demo(&pool).await;
        (
            OpenReaderHandler::new(repo.clone(), Arc::new(ContentNormalizer::default())),
            repo,
        )
    }

    #[tokio::test]
    async fn test_defaults_to_first_novel_by_title() {
        let (handler, _) = handler().await;
        let view = handler
            .handle(OpenReader {
                words_per_page: 150,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(view.novel.slug().as_str(), "another");
        assert_eq!(view.position.chapter_index, 1);
        assert_eq!(view.position.page_index, 0);
        assert_eq!(view.novels.len(), 2);
    }

    #[tokio::test]
    async fn test_address_params_and_page_clamp() {
        let (handler, _) = handler().await;
        let view = handler
            .handle(OpenReader {
                novel: Some("demo".to_string()),
                chapter: Some(1),
                page: Some(42),
                show_end: true,
                words_per_page: 150,
                fallback: None,
            })
            .await
            .unwrap();

        assert_eq!(view.page_count(), 2);
        assert_eq!(view.position.page_index, 1);
        assert!(view.availability.prev_page);
        assert!(!view.availability.next_page);
        assert!(view.availability.next_chapter);
        assert!(view.show_chapter_end);
        assert_eq!(view.tab_title(), "Chapter One");
    }

    #[tokio::test]
    async fn test_missing_chapter_clamped_to_nearest() {
        let (handler, _) = handler().await;
        let view = handler
            .handle(OpenReader {
                novel: Some("demo".to_string()),
                chapter: Some(99),
                words_per_page: 150,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(view.position.chapter_index, 3);
        assert!(!view.availability.next_chapter);
        assert_eq!(view.source, ContentSource::Edited);
    }

    #[tokio::test]
    async fn test_session_fallback() {
        let (handler, repo) = handler().await;
        let demo = repo
            .find_novel_by_slug(&crate::domain::novel::Slug::new("demo").unwrap())
            .await
            .unwrap()
            .unwrap();

        let view = handler
            .handle(OpenReader {
                words_per_page: 150,
                fallback: Some(ReaderPosition {
                    novel_id: demo.id(),
                    chapter_index: 1,
                    page_index: 1,
                }),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(view.novel.slug().as_str(), "demo");
        assert_eq!(view.position.page_index, 1);
        assert!(!view.show_chapter_end);
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let (_db, repo) = memory_repository().await;
        let handler = OpenReaderHandler::new(repo, Arc::new(ContentNormalizer::default()));
        let result = handler.handle(OpenReader::default()).await;
        assert!(matches!(result, Err(ApplicationError::EmptyCatalog)));
    }

    #[tokio::test]
    async fn test_open_editor() {
        let (_, repo) = handler().await;
        let editor = OpenEditorHandler::new(
            repo,
            Arc::new(DisabledRewriteClient),
            Arc::new(ContentNormalizer::default()),
        );

        let view = editor
            .handle(OpenEditor {
                slug: "demo".to_string(),
                chapter_index: 3,
            })
            .await
            .unwrap();

        assert_eq!(view.source, ContentSource::Edited);
        assert!(view.display.starts_with("Edited"));
        assert_eq!(view.reference, "Short raw text.");
        assert!(!view.rewrite_available);
    }
}
