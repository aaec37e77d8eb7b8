//! Domain Layer - 领域层
//!
//! 纯逻辑，不涉及任何 I/O:
//! - Novel Context: 小说 / 章节
//! - 内容规范化（content_normalizer）
//! - 分页器（paginator）
//! - 阅读状态机（reader）

pub mod content_normalizer;
pub mod novel;
pub mod paginator;
pub mod reader;

pub use content_normalizer::{ContentNormalizer, NormalizedContent, NormalizerConfig};
pub use paginator::{paginate, paginate_html, Page, Pagination};
pub use reader::{
    ChapterOutline, NavAction, NavAvailability, NavOutcome, Navigation, ReaderPosition,
};
