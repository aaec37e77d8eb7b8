//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（NovelRepository、RewriteEngine、SessionStore、PagePresenter）
//! - commands: CQRS 命令及处理器（导航、编辑、AI 改写）
//! - queries: CQRS 查询及处理器（目录、阅读视图、编辑视图）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

mod reading;

// Re-exports
pub use commands::{
    // Reader commands
    Navigate,
    SelectNovel,
    // Edit commands
    RewriteChapter,
    SaveChapterEdit,
    // Handlers
    handlers::{
        EditResponse, NavigateHandler, NavigateResponse, RewriteChapterHandler,
        SaveChapterEditHandler, SelectNovelHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Presenter
    FontFamily,
    PagePresenterPort,
    ReaderPreferences,
    ReaderView,
    RenderMode,
    Theme,
    // Repositories
    NovelRepositoryPort,
    RepositoryError,
    // Rewrite engine
    RewriteEnginePort,
    RewriteError,
    // Session store
    ReaderSession,
    SessionError,
    SessionStorePort,
};

pub use queries::{
    // Novel queries
    GetChapterPages,
    ListChapters,
    ListNovels,
    // Reader queries
    OpenEditor,
    OpenReader,
    // Handlers
    handlers::{
        ChapterListResponse, ChapterPagesResponse, EditorView, GetChapterPagesHandler,
        ListChaptersHandler, ListNovelsHandler, OpenEditorHandler, OpenReaderHandler,
    },
};
