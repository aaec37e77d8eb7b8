//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod edit_handlers;
mod reader_handlers;

pub use edit_handlers::*;
pub use reader_handlers::*;
