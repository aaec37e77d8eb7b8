//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::application::ports::RenderMode;
use crate::domain::content_normalizer::{
    NormalizerConfig, DEFAULT_MIN_EDIT_CHARS, DEFAULT_SENTINEL_END, DEFAULT_SENTINEL_START,
};
use crate::domain::paginator::DEFAULT_WORDS_PER_PAGE;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 阅读器配置
    #[serde(default)]
    pub reader: ReaderConfig,

    /// AI 改写服务配置
    #[serde(default)]
    pub rewrite: RewriteConfig,

    /// 阅读会话配置
    #[serde(default)]
    pub session: SessionConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// 数据库配置
///
/// `url` 没有默认值：未配置时服务仍然启动，但每个阅读请求都会提示"未配置存储"。
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库 URL，例如 `sqlite:data/novels.db?mode=rwc`
    #[serde(default)]
    pub url: Option<String>,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// 获取连接超时（秒）
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// 返回非空的数据库 URL
    pub fn resolved_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// 阅读器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    /// 默认每页词数
    #[serde(default = "default_words_per_page")]
    pub words_per_page: usize,

    /// 用户可调整的每页词数下限
    #[serde(default = "default_min_words_per_page")]
    pub min_words_per_page: usize,

    /// 用户可调整的每页词数上限
    #[serde(default = "default_max_words_per_page")]
    pub max_words_per_page: usize,

    /// 编辑稿被视为权威所需的最小字符数
    #[serde(default = "default_min_edit_chars")]
    pub min_edit_chars: usize,

    /// 默认展示模式
    #[serde(default)]
    pub default_mode: RenderMode,

    /// JSON 信封中承载正文的字段（按优先级）
    #[serde(default = "default_json_body_fields")]
    pub json_body_fields: Vec<String>,

    /// 生成内容起始哨兵
    #[serde(default = "default_sentinel_start")]
    pub sentinel_start: String,

    /// 生成内容结束哨兵
    #[serde(default = "default_sentinel_end")]
    pub sentinel_end: String,
}

fn default_words_per_page() -> usize {
    DEFAULT_WORDS_PER_PAGE
}

fn default_min_words_per_page() -> usize {
    50
}

fn default_max_words_per_page() -> usize {
    1000
}

fn default_min_edit_chars() -> usize {
    DEFAULT_MIN_EDIT_CHARS
}

fn default_json_body_fields() -> Vec<String> {
    vec!["content".to_string(), "text".to_string(), "body".to_string()]
}

fn default_sentinel_start() -> String {
    DEFAULT_SENTINEL_START.to_string()
}

fn default_sentinel_end() -> String {
    DEFAULT_SENTINEL_END.to_string()
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            words_per_page: default_words_per_page(),
            min_words_per_page: default_min_words_per_page(),
            max_words_per_page: default_max_words_per_page(),
            min_edit_chars: default_min_edit_chars(),
            default_mode: RenderMode::default(),
            json_body_fields: default_json_body_fields(),
            sentinel_start: default_sentinel_start(),
            sentinel_end: default_sentinel_end(),
        }
    }
}

impl ReaderConfig {
    /// 转换为规范化器配置
    pub fn normalizer_config(&self) -> NormalizerConfig {
        NormalizerConfig {
            min_edit_chars: self.min_edit_chars,
            json_body_fields: self.json_body_fields.clone(),
            sentinel_start: self.sentinel_start.clone(),
            sentinel_end: self.sentinel_end.clone(),
        }
    }

    /// 把用户请求的每页词数限制在允许范围内
    pub fn clamp_words_per_page(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.words_per_page)
            .clamp(self.min_words_per_page, self.max_words_per_page)
    }
}

/// AI 改写服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct RewriteConfig {
    /// 服务基础 URL（OpenAI 兼容接口）
    #[serde(default = "default_rewrite_url")]
    pub url: String,

    /// API Key，未设置时改写功能禁用
    #[serde(default)]
    pub api_key: Option<String>,

    /// 模型名称
    #[serde(default = "default_rewrite_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_rewrite_timeout")]
    pub timeout_secs: u64,
}

fn default_rewrite_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_rewrite_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_rewrite_timeout() -> u64 {
    60
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            url: default_rewrite_url(),
            api_key: None,
            model: default_rewrite_model(),
            timeout_secs: default_rewrite_timeout(),
        }
    }
}

impl RewriteConfig {
    /// 返回非空的 API Key
    pub fn resolved_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

/// 阅读会话配置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// 会话闲置过期时间（秒）
    #[serde(default = "default_session_expire")]
    pub expire_secs: u64,

    /// 过期会话清理间隔（秒）
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_session_expire() -> u64 {
    86400 // 24 小时
}

fn default_sweep_interval() -> u64 {
    600 // 10 分钟
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expire_secs: default_session_expire(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
