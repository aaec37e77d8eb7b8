//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 会话过期时间上限（一年）
const MAX_SESSION_EXPIRE_SECS: u64 = 365 * 24 * 60 * 60;

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `READER_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `READER_SERVER__PORT=8080`
/// - `READER_DATABASE__URL=sqlite:data/novels.db?mode=rwc`
/// - `READER_REWRITE__API_KEY=sk-...`
/// - `READER_READER__JSON_BODY_FIELDS=content,text`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    // database.url 与 rewrite.api_key 故意没有默认值
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8501)?
        .set_default("database.max_connections", 5)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("reader.words_per_page", 150)?
        .set_default("reader.min_words_per_page", 50)?
        .set_default("reader.max_words_per_page", 1000)?
        .set_default("reader.min_edit_chars", 50)?
        .set_default("reader.default_mode", "client")?
        .set_default("rewrite.url", "https://api.openai.com")?
        .set_default("rewrite.model", "gpt-4o-mini")?
        .set_default("rewrite.timeout_secs", 60)?
        .set_default("session.expire_secs", 86400)?
        .set_default("session.sweep_interval_secs", 600)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 前缀: READER_，层级分隔符: __
    builder = builder.add_source(
        Environment::with_prefix("READER")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("reader.json_body_fields")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.reader.words_per_page == 0 {
        return Err(ConfigError::ValidationError(
            "Words per page cannot be 0".to_string(),
        ));
    }

    if config.reader.min_words_per_page == 0
        || config.reader.min_words_per_page > config.reader.max_words_per_page
    {
        return Err(ConfigError::ValidationError(format!(
            "Invalid words per page bounds: {}..{}",
            config.reader.min_words_per_page, config.reader.max_words_per_page
        )));
    }

    if config.rewrite.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Rewrite timeout cannot be 0".to_string(),
        ));
    }

    if config.session.expire_secs == 0 || config.session.expire_secs > MAX_SESSION_EXPIRE_SECS {
        return Err(ConfigError::ValidationError(format!(
            "Session expire must be within 1..={} seconds",
            MAX_SESSION_EXPIRE_SECS
        )));
    }

    if config.session.sweep_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Session sweep interval cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    match config.database.resolved_url() {
        Some(url) => tracing::info!("Database: {}", url),
        None => tracing::warn!("Database: <not configured>"),
    }
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Words Per Page: {}", config.reader.words_per_page);
    tracing::info!("Min Edit Chars: {}", config.reader.min_edit_chars);
    tracing::info!("Default Render Mode: {}", config.reader.default_mode.as_str());
    if config.rewrite.resolved_api_key().is_some() {
        tracing::info!("Rewrite: {} ({})", config.rewrite.url, config.rewrite.model);
        tracing::info!("Rewrite Timeout: {}s", config.rewrite.timeout_secs);
    } else {
        tracing::info!("Rewrite: disabled (no API key)");
    }
    tracing::info!("Session Expire: {}s", config.session.expire_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
