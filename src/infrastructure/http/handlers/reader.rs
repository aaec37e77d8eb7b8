//! Reader HTTP Handlers
//!
//! - `GET /`         阅读页
//! - `GET /read/nav` 执行一个导航动作后 303 重定向到规范地址

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::application::{Navigate, OpenReader, SelectNovel};
use crate::domain::NavAction;
use crate::infrastructure::http::dto::ReaderParams;
use crate::infrastructure::http::error::PageError;
use crate::infrastructure::http::session;
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::render::{reader_page, ReaderAddress};

/// 阅读页
pub async fn read_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ReaderParams>,
) -> Response {
    let store = state.session_store.as_ref();
    let reader_session = session::load_or_create(store, &headers, state.default_preferences());
    let prefs = params.apply_preferences(reader_session.preferences, &state.reader_config);
    session::remember_preferences(store, &reader_session.id, prefs);

    let query = OpenReader {
        novel: params.novel(),
        chapter: params.chapter(),
        page: params.page(),
        show_end: params.show_end(),
        words_per_page: prefs.words_per_page,
        fallback: reader_session.position,
    };

    let result = state
        .with_reconnect(|| state.open_reader_handler.handle(query.clone()))
        .await;
    let cookie = [(header::SET_COOKIE, session::cookie(&reader_session.id))];

    match result {
        Ok(view) => {
            session::remember_position(store, &reader_session.id, view.position);
            let address = ReaderAddress::from_view(&view, &prefs);
            if !is_canonical(&params, &address) {
                tracing::debug!(
                    novel = %address.novel,
                    chapter = address.chapter,
                    page = address.page,
                    "Redirecting to canonical reader address"
                );
                return (cookie, Redirect::to(&address.reader_href())).into_response();
            }
            let presenter = state.presenters.get(prefs.mode);
            let panel = presenter.present(&view, &prefs);
            (cookie, Html(reader_page(&view, &prefs, &panel))).into_response()
        }
        Err(err) => (cookie, PageError::from_application(err, prefs)).into_response(),
    }
}

/// 地址中的位置参数与解析出的位置一致（缺失、无效或被钳制都视为不一致）
fn is_canonical(params: &ReaderParams, address: &ReaderAddress) -> bool {
    params.novel().as_deref() == Some(address.novel.as_str())
        && params.chapter() == Some(address.chapter)
        && params.page() == Some(address.page)
        && params.show_end() == address.end
}

fn parse_action(action: &str, target: Option<u32>) -> Option<NavAction> {
    match action {
        "next_page" => Some(NavAction::NextPage),
        "prev_page" => Some(NavAction::PrevPage),
        "next_chapter" => Some(NavAction::NextChapter),
        "prev_chapter" => Some(NavAction::PrevChapter),
        "select_chapter" => target.map(NavAction::SelectChapter),
        _ => None,
    }
}

/// 导航
///
/// 无法识别的动作或缺少小说参数时不做迁移，直接回到阅读页。
pub async fn navigate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ReaderParams>,
) -> Response {
    let store = state.session_store.as_ref();
    let reader_session = session::load_or_create(store, &headers, state.default_preferences());
    let prefs = params.apply_preferences(reader_session.preferences, &state.reader_config);
    session::remember_preferences(store, &reader_session.id, prefs);
    let cookie = [(header::SET_COOKIE, session::cookie(&reader_session.id))];

    let action = params.action.as_deref().unwrap_or_default();
    let result = if action == "select_novel" {
        let Some(slug) = params.target.clone().filter(|s| !s.trim().is_empty()) else {
            return (cookie, Redirect::to("/")).into_response();
        };
        let command = SelectNovel {
            slug,
            current: reader_session.position,
        };
        state
            .with_reconnect(|| state.select_novel_handler.handle(command.clone()))
            .await
    } else {
        let (Some(nav_action), Some(slug)) =
            (parse_action(action, params.target_chapter()), params.novel())
        else {
            tracing::debug!(action = %action, "Ignoring navigation request");
            let fallback = ReaderAddress::new(
                params.novel().unwrap_or_default(),
                params.chapter().unwrap_or_default(),
                params.page().unwrap_or_default(),
                prefs,
            );
            return (cookie, Redirect::to(&fallback.reader_href())).into_response();
        };
        let command = Navigate {
            slug,
            chapter_index: params.chapter().unwrap_or_default(),
            page_index: params.page().unwrap_or_default(),
            action: nav_action,
            words_per_page: prefs.words_per_page,
        };
        state
            .with_reconnect(|| state.navigate_handler.handle(command.clone()))
            .await
    };

    match result {
        Ok(response) => {
            let position = response.navigation.position;
            session::remember_position(store, &reader_session.id, position);
            let address = ReaderAddress::new(
                response.novel.slug().to_string(),
                position.chapter_index,
                position.page_index,
                prefs,
            )
            .with_end(response.navigation.reached_chapter_end());
            (cookie, Redirect::to(&address.reader_href())).into_response()
        }
        Err(err) => (cookie, PageError::from_application(err, prefs)).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("next_page", None), Some(NavAction::NextPage));
        assert_eq!(parse_action("prev_chapter", None), Some(NavAction::PrevChapter));
        assert_eq!(
            parse_action("select_chapter", Some(4)),
            Some(NavAction::SelectChapter(4))
        );
        assert_eq!(parse_action("select_chapter", None), None);
        assert_eq!(parse_action("jump", Some(1)), None);
    }

    fn params(novel: &str, chapter: &str, page: &str) -> ReaderParams {
        ReaderParams {
            novel: Some(novel.to_string()),
            chapter: Some(chapter.to_string()),
            page: Some(page.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_is_canonical() {
        let address = ReaderAddress::new("demo", 3, 1, Default::default());
        assert!(is_canonical(&params("demo", "3", "1"), &address));
        assert!(!is_canonical(&params("demo", "99", "42"), &address));
        assert!(!is_canonical(&params("demo", "abc", "1"), &address));
        assert!(!is_canonical(&ReaderParams::default(), &address));
        assert!(!is_canonical(&params("demo", "3", "1"), &address.clone().with_end(true)));
    }
}
