//! SQLite Database - 连接管理和迁移
//!
//! 连接池是进程级共享资源，惰性创建并复用；
//! 使用前发现已关闭或探测失败时丢弃并重建，这是系统中唯一的重试行为。

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use tokio::sync::Mutex;

use crate::application::ports::RepositoryError;

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库 URL
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
    /// 获取连接超时
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:")
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let mut options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_millis(5000))
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new().acquire_timeout(config.acquire_timeout);

    if config.is_in_memory() {
        // 内存库只存在于单个连接中
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    } else {
        // WAL 模式，允许并发读写
        options = options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);
        pool_options = pool_options.max_connections(config.max_connections);
    }

    let pool = pool_options.connect_with(options).await?;

    tracing::info!(
        in_memory = config.is_in_memory(),
        max_connections = config.max_connections,
        "SQLite pool created"
    );

    Ok(pool)
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    // 创建 novels 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS novels (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 chapters 表（content_edit 可为空）
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS chapters (
            id TEXT PRIMARY KEY,
            novel_id TEXT NOT NULL,
            chapter_index INTEGER NOT NULL,
            title TEXT NOT NULL,
            content TEXT,
            content_edit TEXT,
            updated_at TEXT,
            FOREIGN KEY (novel_id) REFERENCES novels(id),
            UNIQUE (novel_id, chapter_index)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_chapters_novel_index
        ON chapters(novel_id, chapter_index)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

/// sqlx 错误映射
///
/// 连接层面的失败映射为 `ConnectionLost`，调用方可重建连接后重跑请求。
pub fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::PoolClosed
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_) => RepositoryError::ConnectionLost(err.to_string()),
        sqlx::Error::RowNotFound => RepositoryError::NotFound(err.to_string()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::SerializationError(err.to_string())
        }
        other => RepositoryError::DatabaseError(other.to_string()),
    }
}

/// 连接管理器
///
/// - 未配置数据库 URL 时，每次获取都返回 `NotConfigured`，服务本身照常运行
/// - 首次获取时创建连接池并运行迁移，之后复用
/// - 复用前检查 `is_closed` 并执行 `SELECT 1` 探测，失败则重建
pub struct ConnectionManager {
    config: Option<DatabaseConfig>,
    pool: Mutex<Option<DbPool>>,
}

impl ConnectionManager {
    pub fn new(config: Option<DatabaseConfig>) -> Self {
        Self {
            config,
            pool: Mutex::new(None),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// 获取可用的连接池
    pub async fn pool(&self) -> Result<DbPool, RepositoryError> {
        let config = self.config.as_ref().ok_or(RepositoryError::NotConfigured)?;
        let mut guard = self.pool.lock().await;

        if let Some(pool) = guard.as_ref() {
            if !pool.is_closed() && probe(pool).await {
                return Ok(pool.clone());
            }
            tracing::warn!("Database connection lost, recreating pool");
            pool.close().await;
            *guard = None;
        }

        let pool = open(config).await?;
        *guard = Some(pool.clone());
        Ok(pool)
    }

    /// 丢弃当前连接池并立即重建
    pub async fn reconnect(&self) -> Result<DbPool, RepositoryError> {
        let config = self.config.as_ref().ok_or(RepositoryError::NotConfigured)?;
        let mut guard = self.pool.lock().await;

        if let Some(pool) = guard.take() {
            pool.close().await;
        }

        tracing::info!("Reconnecting database");
        let pool = open(config).await?;
        *guard = Some(pool.clone());
        Ok(pool)
    }

    /// 检查存储是否可用
    pub async fn health_check(&self) -> bool {
        self.pool().await.is_ok()
    }

    /// 关闭连接池（优雅关闭时调用）
    pub async fn close(&self) {
        if let Some(pool) = self.pool.lock().await.take() {
            pool.close().await;
        }
    }
}

async fn probe(pool: &DbPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}

async fn open(config: &DatabaseConfig) -> Result<DbPool, RepositoryError> {
    let pool = create_pool(config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to open database");
        RepositoryError::ConnectionLost(e.to_string())
    })?;
    run_migrations(&pool).await.map_err(map_sqlx_error)?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_in_memory_db() {
        let config = DatabaseConfig::in_memory();
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_not_configured() {
        let manager = ConnectionManager::new(None);
        assert!(!manager.is_configured());
        assert!(matches!(
            manager.pool().await,
            Err(RepositoryError::NotConfigured)
        ));
        assert!(!manager.health_check().await);
    }

    #[tokio::test]
    async fn test_pool_is_memoized() {
        let manager = ConnectionManager::new(Some(DatabaseConfig::in_memory()));
        let first = manager.pool().await.unwrap();
        sqlx::query("INSERT INTO novels (id, title, slug) VALUES ('n1', 'T', 't')")
            .execute(&first)
            .await
            .unwrap();

        let second = manager.pool().await.unwrap();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM novels")
            .fetch_one(&second)
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }

    #[tokio::test]
    async fn test_closed_pool_is_recreated() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("reader.db").display());
        let manager = ConnectionManager::new(Some(DatabaseConfig::new(url)));

        let pool = manager.pool().await.unwrap();
        sqlx::query("INSERT INTO novels (id, title, slug) VALUES ('n1', 'T', 't')")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;

        let recreated = manager.pool().await.unwrap();
        assert!(!recreated.is_closed());
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM novels")
            .fetch_one(&recreated)
            .await
            .unwrap();
        assert_eq!(count.0, 1);

        let reconnected = manager.reconnect().await.unwrap();
        assert!(recreated.is_closed());
        assert!(!reconnected.is_closed());
        manager.close().await;
    }

    #[test]
    fn test_map_sqlx_error() {
        assert!(map_sqlx_error(sqlx::Error::PoolClosed).is_connection_lost());
        assert!(map_sqlx_error(sqlx::Error::PoolTimedOut).is_connection_lost());
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            RepositoryError::NotFound(_)
        ));
    }
}
