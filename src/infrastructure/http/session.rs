//! 阅读会话 Cookie
//!
//! 会话 ID 保存在 `reader_sid` Cookie 中；未知或缺失时创建新会话。

use axum::http::{header, HeaderMap};

use crate::application::ports::{ReaderPreferences, ReaderSession, SessionStorePort};
use crate::domain::ReaderPosition;

pub const SESSION_COOKIE: &str = "reader_sid";

/// 从 Cookie 头中读取会话 ID
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// 读取会话，不存在时创建
pub fn load_or_create(
    store: &dyn SessionStorePort,
    headers: &HeaderMap,
    defaults: ReaderPreferences,
) -> ReaderSession {
    if let Some(session) = session_id(headers).and_then(|id| store.get(&id).ok()) {
        return session;
    }

    let session = ReaderSession::new(defaults);
    if let Err(e) = store.create(session.clone()) {
        tracing::warn!(error = %e, "Failed to create reader session");
    }
    session
}

/// Set-Cookie 头的值
pub fn cookie(session_id: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, session_id
    )
}

pub fn remember_preferences(store: &dyn SessionStorePort, session_id: &str, prefs: ReaderPreferences) {
    if let Err(e) = store.save_preferences(session_id, prefs) {
        tracing::debug!(error = %e, "Preferences not saved");
    }
}

pub fn remember_position(store: &dyn SessionStorePort, session_id: &str, position: ReaderPosition) {
    if let Err(e) = store.save_position(session_id, position) {
        tracing::debug!(error = %e, "Position not saved");
    }
}
