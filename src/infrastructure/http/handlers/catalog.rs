//! Catalog HTTP Handlers (JSON)

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::application::{GetChapterPages, ListChapters, ListNovels};
use crate::infrastructure::http::dto::{
    ApiResponse, ChapterPagesRequest, ChapterPagesResponse, ChapterResponse, ChaptersResponse,
    ListChaptersRequest, NovelResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出所有小说
pub async fn list_novels(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<NovelResponse>>>, ApiError> {
    let novels = state
        .with_reconnect(|| state.list_novels_handler.handle(ListNovels))
        .await?;

    Ok(Json(ApiResponse::success(
        novels.iter().map(NovelResponse::from).collect(),
    )))
}

/// 获取章节目录
pub async fn list_chapters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListChaptersRequest>,
) -> Result<Json<ApiResponse<ChaptersResponse>>, ApiError> {
    let query = ListChapters { slug: req.slug };
    let result = state
        .with_reconnect(|| state.list_chapters_handler.handle(query.clone()))
        .await?;

    Ok(Json(ApiResponse::success(ChaptersResponse {
        novel: NovelResponse::from(&result.novel),
        chapters: result.chapters.iter().map(ChapterResponse::from).collect(),
    })))
}

/// 获取整章分页
pub async fn chapter_pages(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChapterPagesRequest>,
) -> Result<Json<ApiResponse<ChapterPagesResponse>>, ApiError> {
    let words_per_page = state.reader_config.clamp_words_per_page(req.words_per_page);
    let query = GetChapterPages {
        slug: req.slug,
        chapter_index: req.chapter_index,
        words_per_page,
    };
    let result = state
        .with_reconnect(|| state.chapter_pages_handler.handle(query.clone()))
        .await?;

    Ok(Json(ApiResponse::success(ChapterPagesResponse {
        novel: NovelResponse::from(&result.novel),
        chapter: ChapterResponse::from(&result.chapter),
        source: result.source.as_str().to_string(),
        words_per_page: result.pagination.words_per_page(),
        page_count: result.pagination.page_count(),
        pages: result.pagination.fragments(),
    })))
}
