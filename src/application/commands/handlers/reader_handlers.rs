//! Reader Command Handlers

use std::sync::Arc;

use crate::application::commands::{Navigate, SelectNovel};
use crate::application::error::ApplicationError;
use crate::application::ports::NovelRepositoryPort;
use crate::application::reading::{load_outline, paginate_chapter, resolve_novel};
use crate::domain::novel::Novel;
use crate::domain::{ContentNormalizer, Navigation, ReaderPosition};

/// 导航响应
#[derive(Debug, Clone)]
pub struct NavigateResponse {
    pub novel: Novel,
    pub navigation: Navigation,
}

/// Navigate Handler
pub struct NavigateHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    normalizer: Arc<ContentNormalizer>,
}

impl NavigateHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>, normalizer: Arc<ContentNormalizer>) -> Self {
        Self {
            novel_repo,
            normalizer,
        }
    }

    pub async fn handle(&self, command: Navigate) -> Result<NavigateResponse, ApplicationError> {
        let novel = resolve_novel(self.novel_repo.as_ref(), &command.slug).await?;
        let (_, outline) = load_outline(self.novel_repo.as_ref(), novel.id()).await?;

        // 地址里的章节可能已不存在
        let chapter_index = outline
            .nearest(command.chapter_index)
            .unwrap_or(command.chapter_index);

        let paginated = paginate_chapter(
            self.novel_repo.as_ref(),
            &self.normalizer,
            novel.id(),
            chapter_index,
            command.words_per_page,
        )
        .await?;

        let position = ReaderPosition {
            novel_id: novel.id(),
            chapter_index,
            page_index: command.page_index,
        };
        let navigation = position.apply(
            command.action,
            &outline,
            paginated.pagination.page_count(),
        );

        tracing::debug!(
            novel = %novel.slug(),
            action = command.action.as_str(),
            from_chapter = chapter_index,
            to_chapter = navigation.position.chapter_index,
            to_page = navigation.position.page_index,
            moved = navigation.is_moved(),
            "Navigation applied"
        );

        Ok(NavigateResponse { novel, navigation })
    }
}

/// SelectNovel Handler
pub struct SelectNovelHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
}

impl SelectNovelHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>) -> Self {
        Self { novel_repo }
    }

    pub async fn handle(&self, command: SelectNovel) -> Result<NavigateResponse, ApplicationError> {
        let novel = resolve_novel(self.novel_repo.as_ref(), &command.slug).await?;
        let (_, outline) = load_outline(self.novel_repo.as_ref(), novel.id()).await?;

        let current = command
            .current
            .unwrap_or_else(|| ReaderPosition::start(novel.id(), &outline));
        let navigation = current.select_novel(novel.id(), &outline);

        tracing::debug!(
            novel = %novel.slug(),
            chapter = navigation.position.chapter_index,
            "Novel selected"
        );

        Ok(NavigateResponse { novel, navigation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reader::Boundary;
    use crate::domain::{NavAction, NavOutcome};
    use crate::infrastructure::persistence::sqlite::test_support::{memory_repository, seed_demo};

    async fn setup() -> Arc<dyn NovelRepositoryPort> {
        let (db, repo) = memory_repository().await;
        let pool = db.pool().await.unwrap();
        seed_demo(&pool).await;
        repo
    }

    fn navigate(chapter_index: u32, page_index: usize, action: NavAction) -> Navigate {
        Navigate {
            slug: "demo".to_string(),
            chapter_index,
            page_index,
            action,
            words_per_page: 150,
        }
    }

    #[tokio::test]
    async fn test_next_page_then_chapter_end() {
        let handler = NavigateHandler::new(setup().await, Arc::new(ContentNormalizer::default()));

        let first = handler.handle(navigate(1, 0, NavAction::NextPage)).await.unwrap();
        assert!(first.navigation.is_moved());
        assert_eq!(first.navigation.position.page_index, 1);

        let second = handler.handle(navigate(1, 1, NavAction::NextPage)).await.unwrap();
        assert!(second.navigation.reached_chapter_end());
        assert_eq!(second.navigation.position.page_index, 1);
    }

    #[tokio::test]
    async fn test_chapter_navigation_at_last_chapter() {
        let handler = NavigateHandler::new(setup().await, Arc::new(ContentNormalizer::default()));

        let to_three = handler.handle(navigate(2, 0, NavAction::NextChapter)).await.unwrap();
        assert_eq!(to_three.navigation.position.chapter_index, 3);
        assert_eq!(to_three.navigation.position.page_index, 0);

        let stay = handler.handle(navigate(3, 0, NavAction::NextChapter)).await.unwrap();
        assert_eq!(
            stay.navigation.outcome,
            NavOutcome::Unavailable(Boundary::LastChapter)
        );
        assert_eq!(stay.navigation.position.chapter_index, 3);
    }

    #[tokio::test]
    async fn test_stale_page_clamped_before_prev() {
        let handler = NavigateHandler::new(setup().await, Arc::new(ContentNormalizer::default()));
        let response = handler.handle(navigate(1, 40, NavAction::PrevPage)).await.unwrap();
        assert_eq!(response.navigation.position.page_index, 0);
    }

    #[tokio::test]
    async fn test_select_novel_resets_position() {
        let repo = setup().await;
        let demo = NavigateHandler::new(repo.clone(), Arc::new(ContentNormalizer::default()))
            .handle(navigate(3, 0, NavAction::PrevPage))
            .await
            .unwrap();

        let handler = SelectNovelHandler::new(repo);
        let response = handler
            .handle(SelectNovel {
                slug: "another".to_string(),
                current: Some(demo.navigation.position),
            })
            .await
            .unwrap();

        assert_eq!(response.novel.slug().as_str(), "another");
        assert_eq!(response.navigation.position.novel_id, response.novel.id());
        assert_eq!(response.navigation.position.chapter_index, 1);
        assert_eq!(response.navigation.position.page_index, 0);
    }
}
