//! In-Memory Session Store Implementation

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use tokio::task::JoinHandle;

use crate::application::ports::{ReaderPreferences, ReaderSession, SessionError, SessionStorePort};
use crate::domain::ReaderPosition;

/// 内存会话存储
pub struct InMemorySessionStore {
    sessions: DashMap<String, ReaderSession>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStorePort for InMemorySessionStore {
    fn create(&self, session: ReaderSession) -> Result<String, SessionError> {
        let session_id = session.id.clone();
        if self.sessions.contains_key(&session_id) {
            return Err(SessionError::AlreadyExists(session_id));
        }
        self.sessions.insert(session_id.clone(), session);
        tracing::debug!(session_id = %session_id, "Reader session created");
        Ok(session_id)
    }

    fn get(&self, id: &str) -> Result<ReaderSession, SessionError> {
        self.sessions
            .get(id)
            .map(|s| s.clone())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn save_position(&self, id: &str, position: ReaderPosition) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        session.position = Some(position);
        session.last_activity = Utc::now();
        tracing::trace!(
            session_id = %id,
            chapter = position.chapter_index,
            page = position.page_index,
            "Reader position saved"
        );
        Ok(())
    }

    fn save_preferences(&self, id: &str, preferences: ReaderPreferences) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        session.preferences = preferences;
        session.last_activity = Utc::now();
        Ok(())
    }

    fn close(&self, id: &str) -> Result<(), SessionError> {
        self.sessions
            .remove(id)
            .map(|_| {
                tracing::debug!(session_id = %id, "Reader session closed");
            })
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String> {
        let now = Utc::now();
        // 超出 chrono 可表示范围的超时视为永不过期
        let Some(timeout) = i64::try_from(idle_timeout_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
        else {
            return Vec::new();
        };

        self.sessions
            .iter()
            .filter_map(|entry| {
                let elapsed = now - entry.last_activity;
                if elapsed > timeout {
                    Some(entry.key().clone())
                } else {
                    None
                }
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}

/// 启动过期会话清理任务
pub fn spawn_session_sweeper(
    store: Arc<dyn SessionStorePort>,
    expire_secs: u64,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let expired = store.get_expired_sessions(expire_secs);
            if expired.is_empty() {
                continue;
            }
            for id in &expired {
                let _ = store.close(id);
            }
            tracing::info!(
                removed = expired.len(),
                remaining = store.len(),
                "Expired reader sessions removed"
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::NovelId;

    #[test]
    fn test_session_lifecycle() {
        let store = InMemorySessionStore::new();
        let session = ReaderSession::new(ReaderPreferences::default());
        let session_id = session.id.clone();

        assert!(store.create(session.clone()).is_ok());
        assert!(matches!(
            store.create(session),
            Err(SessionError::AlreadyExists(_))
        ));
        assert!(store.get(&session_id).unwrap().position.is_none());

        let position = ReaderPosition {
            novel_id: NovelId::new(),
            chapter_index: 4,
            page_index: 2,
        };
        store.save_position(&session_id, position).unwrap();
        assert_eq!(store.get(&session_id).unwrap().position, Some(position));

        let prefs = ReaderPreferences::default().with_font_size(26);
        store.save_preferences(&session_id, prefs).unwrap();
        assert_eq!(store.get(&session_id).unwrap().preferences.font_size, 26);

        assert_eq!(store.len(), 1);
        store.close(&session_id).unwrap();
        assert!(store.is_empty());
        assert!(matches!(
            store.save_position(&session_id, position),
            Err(SessionError::NotFound(_))
        ));
    }

    #[test]
    fn test_expired_sessions() {
        let store = InMemorySessionStore::new();
        let mut stale = ReaderSession::new(ReaderPreferences::default());
        stale.last_activity = Utc::now() - chrono::Duration::seconds(120);
        let stale_id = store.create(stale).unwrap();
        store
            .create(ReaderSession::new(ReaderPreferences::default()))
            .unwrap();

        assert_eq!(store.get_expired_sessions(60), vec![stale_id]);
        assert!(store.get_expired_sessions(u64::MAX).is_empty());
    }

    #[tokio::test]
    async fn test_sweeper_removes_expired() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut stale = ReaderSession::new(ReaderPreferences::default());
        stale.last_activity = Utc::now() - chrono::Duration::seconds(120);
        store.create(stale).unwrap();

        let handle = spawn_session_sweeper(store.clone(), 60, Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();

        assert!(store.is_empty());
    }
}
