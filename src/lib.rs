//! Novel Reader - 分页小说阅读器
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Novel Context: 小说与章节
//! - Content Normalizer: 章节文本规范化（JSON 包裹、改写标记、换行）
//! - Paginator: 按词数分页
//! - Reader: 阅读位置状态机
//!
//! 应用层 (application/):
//! - Ports: 端口定义（NovelRepository, RewriteEngine, SessionStore, PagePresenter）
//! - Commands: CQRS 命令处理器（导航、编辑、改写）
//! - Queries: CQRS 查询处理器（阅读页、编辑页、目录）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 阅读页 HTML + JSON API
//! - Render: 服务端同步 / 浏览器本地两种阅读页渲染
//! - Memory: SessionStore 内存实现
//! - Persistence: SQLite 存储与断线重建
//! - Adapters: AI 改写客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
