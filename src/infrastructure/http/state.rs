//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::future::Future;
use std::sync::Arc;

use crate::application::{
    // Command handlers
    NavigateHandler, RewriteChapterHandler, SaveChapterEditHandler, SelectNovelHandler,
    // Query handlers
    GetChapterPagesHandler, ListChaptersHandler, ListNovelsHandler, OpenEditorHandler,
    OpenReaderHandler,
    // Ports
    ApplicationError, NovelRepositoryPort, ReaderPreferences, RewriteEnginePort, SessionStorePort,
};
use crate::config::ReaderConfig;
use crate::domain::ContentNormalizer;
use crate::infrastructure::persistence::sqlite::ConnectionManager;
use crate::infrastructure::render::Presenters;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub db: Arc<ConnectionManager>,
    pub novel_repo: Arc<dyn NovelRepositoryPort>,
    pub rewrite_engine: Arc<dyn RewriteEnginePort>,
    pub session_store: Arc<dyn SessionStorePort>,
    pub presenters: Presenters,
    pub reader_config: ReaderConfig,

    // ========== Command Handlers ==========
    pub navigate_handler: NavigateHandler,
    pub select_novel_handler: SelectNovelHandler,
    pub save_edit_handler: SaveChapterEditHandler,
    pub rewrite_handler: RewriteChapterHandler,

    // ========== Query Handlers ==========
    pub list_novels_handler: ListNovelsHandler,
    pub list_chapters_handler: ListChaptersHandler,
    pub chapter_pages_handler: GetChapterPagesHandler,
    pub open_reader_handler: OpenReaderHandler,
    pub open_editor_handler: OpenEditorHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        db: Arc<ConnectionManager>,
        novel_repo: Arc<dyn NovelRepositoryPort>,
        rewrite_engine: Arc<dyn RewriteEnginePort>,
        session_store: Arc<dyn SessionStorePort>,
        reader_config: ReaderConfig,
    ) -> Self {
        let normalizer = Arc::new(ContentNormalizer::new(&reader_config.normalizer_config()));

        Self {
            // Ports
            db,
            novel_repo: novel_repo.clone(),
            rewrite_engine: rewrite_engine.clone(),
            session_store,
            presenters: Presenters::new(),

            // Command handlers
            navigate_handler: NavigateHandler::new(novel_repo.clone(), normalizer.clone()),
            select_novel_handler: SelectNovelHandler::new(novel_repo.clone()),
            save_edit_handler: SaveChapterEditHandler::new(
                novel_repo.clone(),
                reader_config.min_edit_chars,
            ),
            rewrite_handler: RewriteChapterHandler::new(
                novel_repo.clone(),
                rewrite_engine.clone(),
                normalizer.clone(),
            ),

            // Query handlers
            list_novels_handler: ListNovelsHandler::new(novel_repo.clone()),
            list_chapters_handler: ListChaptersHandler::new(novel_repo.clone()),
            chapter_pages_handler: GetChapterPagesHandler::new(novel_repo.clone(), normalizer.clone()),
            open_reader_handler: OpenReaderHandler::new(novel_repo.clone(), normalizer.clone()),
            open_editor_handler: OpenEditorHandler::new(novel_repo, rewrite_engine, normalizer),

            reader_config,
        }
    }

    /// 新会话的展示偏好
    pub fn default_preferences(&self) -> ReaderPreferences {
        ReaderPreferences {
            mode: self.reader_config.default_mode,
            words_per_page: self.reader_config.words_per_page,
            ..Default::default()
        }
    }

    /// 执行一次请求；存储连接断开时重建连接并整体重跑一次
    pub async fn with_reconnect<T, F, Fut>(&self, operation: F) -> Result<T, ApplicationError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApplicationError>>,
    {
        match operation().await {
            Err(err) if err.is_connection_lost() => {
                tracing::warn!(error = %err, "Storage connection lost, retrying once");
                self.db.reconnect().await?;
                operation().await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ListNovels;
    use crate::infrastructure::adapters::DisabledRewriteClient;
    use crate::infrastructure::memory::InMemorySessionStore;
    use crate::infrastructure::persistence::sqlite::test_support::{
        memory_repository, seed_demo, FlakyRepository,
    };

    async fn flaky_state(failures: usize) -> (AppState, Arc<FlakyRepository>) {
        let (db, repo) = memory_repository().await;
        seed_demo(&db.pool().await.unwrap()).await;
        let flaky = Arc::new(FlakyRepository::new(repo, failures));
        let state = AppState::new(
            db,
            flaky.clone(),
            Arc::new(DisabledRewriteClient),
            Arc::new(InMemorySessionStore::new()),
            ReaderConfig::default(),
        );
        (state, flaky)
    }

    #[tokio::test]
    async fn test_connection_lost_reruns_once() {
        let (state, flaky) = flaky_state(1).await;

        let novels = state
            .with_reconnect(|| state.list_novels_handler.handle(ListNovels))
            .await
            .unwrap();

        assert_eq!(novels.len(), 2);
        assert_eq!(flaky.calls(), 2);
    }

    #[tokio::test]
    async fn test_second_connection_loss_is_reported() {
        let (state, flaky) = flaky_state(usize::MAX).await;

        let err = state
            .with_reconnect(|| state.list_novels_handler.handle(ListNovels))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::StorageUnavailable(_)));
        assert_eq!(flaky.calls(), 2);
    }
}
