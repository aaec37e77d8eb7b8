//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：目录、阅读视图、编辑视图

mod novel_queries;
mod reader_queries;

pub mod handlers;

pub use novel_queries::*;
pub use reader_queries::*;
