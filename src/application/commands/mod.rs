//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：阅读导航与章节编辑

mod edit_commands;
mod reader_commands;

pub mod handlers;

pub use edit_commands::*;
pub use reader_commands::*;
