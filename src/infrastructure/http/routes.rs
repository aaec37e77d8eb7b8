//! HTTP Routes
//!
//! 阅读页:
//! - /                      GET   阅读页（novel, chapter, page, end, mode, wpp, theme, font, size）
//! - /read/nav              GET   导航动作，303 重定向到规范地址
//! - /edit                  GET   编辑页
//! - /edit/save             POST  保存编辑文本
//! - /edit/rewrite          POST  AI 改写
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/novel/list        GET   列出所有小说
//! - /api/novel/chapters    POST  获取章节目录
//! - /api/chapter/pages     POST  获取整章分页

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::read_page))
        .route("/read/nav", get(handlers::navigate))
        .route("/edit", get(handlers::edit_page))
        .route("/edit/save", post(handlers::save_edit))
        .route("/edit/rewrite", post(handlers::rewrite_chapter))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/novel", novel_routes())
        .route("/chapter/pages", post(handlers::chapter_pages))
}

/// Novel 路由
fn novel_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_novels))
        .route("/chapters", post(handlers::list_chapters))
}
