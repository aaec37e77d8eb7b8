//! Editor HTTP Handlers
//!
//! - `GET /edit`          编辑页
//! - `POST /edit/save`    保存编辑文本，就地提示结果
//! - `POST /edit/rewrite` AI 改写；失败时就地提示且不写入

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    Form,
};

use crate::application::ports::ReaderPreferences;
use crate::application::{ApplicationError, OpenEditor, RewriteChapter, SaveChapterEdit};
use crate::infrastructure::http::dto::{ReaderParams, RewriteForm, SaveEditForm};
use crate::infrastructure::http::error::PageError;
use crate::infrastructure::http::session;
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::render::{editor_page, Notice};

async fn render_editor(
    state: &AppState,
    slug: String,
    chapter_index: u32,
    prefs: ReaderPreferences,
    notice: Option<Notice>,
    draft: Option<String>,
) -> Response {
    let query = OpenEditor {
        slug,
        chapter_index,
    };
    match state
        .with_reconnect(|| state.open_editor_handler.handle(query.clone()))
        .await
    {
        Ok(view) => Html(editor_page(
            &view,
            &prefs,
            notice.as_ref(),
            draft.as_deref(),
        ))
        .into_response(),
        Err(err) => PageError::from_application(err, prefs).into_response(),
    }
}

fn preferences(state: &AppState, headers: &HeaderMap) -> (String, ReaderPreferences) {
    let reader_session =
        session::load_or_create(state.session_store.as_ref(), headers, state.default_preferences());
    (reader_session.id, reader_session.preferences)
}

/// 编辑页
pub async fn edit_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ReaderParams>,
) -> Response {
    let (session_id, prefs) = preferences(&state, &headers);
    let cookie = [(header::SET_COOKIE, session::cookie(&session_id))];

    let (Some(slug), Some(chapter_index)) = (params.novel(), params.chapter()) else {
        let err = ApplicationError::validation("Both novel and chapter are required");
        return (cookie, PageError::from_application(err, prefs)).into_response();
    };

    (
        cookie,
        render_editor(&state, slug, chapter_index, prefs, None, None).await,
    )
        .into_response()
}

/// 保存编辑文本
pub async fn save_edit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<SaveEditForm>,
) -> Response {
    let (_, prefs) = preferences(&state, &headers);
    let command = SaveChapterEdit {
        slug: form.novel.clone(),
        chapter_index: form.chapter,
        text: form.text.clone(),
    };

    let (notice, draft) = match state
        .with_reconnect(|| state.save_edit_handler.handle(command.clone()))
        .await
    {
        Ok(response) => (
            Notice::Success(format!(
                "Saved {} characters. The {} text is now shown to readers.",
                response.char_count,
                response.source.as_str()
            )),
            None,
        ),
        Err(err) => {
            tracing::warn!(error = %err, slug = %form.novel, chapter = form.chapter, "Save failed");
            (Notice::Error(format!("Save failed: {}", err)), Some(form.text))
        }
    };

    render_editor(&state, form.novel, form.chapter, prefs, Some(notice), draft).await
}

/// AI 改写
pub async fn rewrite_chapter(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<RewriteForm>,
) -> Response {
    let (_, prefs) = preferences(&state, &headers);
    let command = RewriteChapter {
        slug: form.novel.clone(),
        chapter_index: form.chapter,
    };

    let notice = match state
        .with_reconnect(|| state.rewrite_handler.handle(command.clone()))
        .await
    {
        Ok(response) => Notice::Success(format!(
            "Rewrite saved ({} characters).",
            response.char_count
        )),
        Err(err) => {
            tracing::warn!(error = %err, slug = %form.novel, chapter = form.chapter, "Rewrite failed");
            Notice::Error(format!("Rewrite failed: {}", err))
        }
    };

    render_editor(&state, form.novel, form.chapter, prefs, Some(notice), None).await
}
