//! Novel Context - 小说限界上下文
//!
//! 职责:
//! - 小说聚合（标题、slug）
//! - 章节实体（原文 / 编辑稿）

mod aggregate;
mod entities;
mod errors;
mod value_objects;

pub use aggregate::Novel;
pub use entities::{Chapter, ChapterSummary, ContentSource};
pub use errors::NovelError;
pub use value_objects::{ChapterId, NovelId, Slug};
