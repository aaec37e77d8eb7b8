//! Novel Reader - 分页小说阅读器
//!
//! - Domain: novel/, content_normalizer, paginator, reader
//! - Application: commands, queries, ports
//! - Infrastructure: http, render, memory, persistence, adapters

use std::sync::Arc;
use std::time::Duration;

use novel_reader::application::{RewriteEnginePort, SessionStorePort};
use novel_reader::config::{load_config, print_config, AppConfig};
use novel_reader::infrastructure::adapters::{
    DisabledRewriteClient, HttpRewriteClient, HttpRewriteClientConfig,
};
use novel_reader::infrastructure::http::{AppState, HttpServer, ServerConfig};
use novel_reader::infrastructure::memory::{spawn_session_sweeper, InMemorySessionStore};
use novel_reader::infrastructure::persistence::sqlite::{
    ConnectionManager, DatabaseConfig, SqliteNovelRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Novel Reader - 分页小说阅读器");
    print_config(&config);

    // 数据库连接惰性建立，未配置时阅读页显示配置提示
    let db_config = match config.database.resolved_url() {
        Some(url) => {
            if let Some(parent) = sqlite_parent_dir(url) {
                tokio::fs::create_dir_all(parent).await?;
            }
            Some(DatabaseConfig {
                database_url: url.to_string(),
                max_connections: config.database.max_connections,
                acquire_timeout: Duration::from_secs(config.database.acquire_timeout_secs),
            })
        }
        None => {
            tracing::warn!("No database configured, set READER_DATABASE__URL");
            None
        }
    };
    let db = Arc::new(ConnectionManager::new(db_config));

    // 创建 Repository 适配器
    let novel_repo = Arc::new(SqliteNovelRepository::new(db.clone()));

    // 创建 AI 改写引擎
    let rewrite_engine: Arc<dyn RewriteEnginePort> = match config.rewrite.resolved_api_key() {
        Some(api_key) => {
            let rewrite_config = HttpRewriteClientConfig::new(&config.rewrite.url, api_key)
                .with_model(&config.rewrite.model)
                .with_timeout(config.rewrite.timeout_secs);
            Arc::new(HttpRewriteClient::new(rewrite_config)?)
        }
        None => {
            tracing::warn!("No rewrite API key configured, AI rewrite disabled");
            Arc::new(DisabledRewriteClient)
        }
    };

    // 创建内存 Session 存储并启动过期清理
    let session_store: Arc<dyn SessionStorePort> = Arc::new(InMemorySessionStore::new());
    spawn_session_sweeper(
        session_store.clone(),
        config.session.expire_secs,
        Duration::from_secs(config.session.sweep_interval_secs),
    );

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(
        db,
        novel_repo,
        rewrite_engine,
        session_store,
        config.reader.clone(),
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},novel_reader={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// sqlite:data/reader.db -> data
fn sqlite_parent_dir(url: &str) -> Option<&std::path::Path> {
    if url.contains(":memory:") {
        return None;
    }
    let path = url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
    let path = path.split('?').next()?;
    std::path::Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
}
