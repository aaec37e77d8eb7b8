//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod presenter;
mod repositories;
mod rewrite_engine;
mod session_store;

pub use presenter::{
    FontFamily, PagePresenterPort, ReaderPreferences, ReaderView, RenderMode, Theme,
    DEFAULT_FONT_SIZE, MAX_FONT_SIZE, MIN_FONT_SIZE,
};
pub use repositories::{NovelRepositoryPort, RepositoryError};
pub use rewrite_engine::{RewriteEnginePort, RewriteError};
pub use session_store::{ReaderSession, SessionError, SessionStorePort};
