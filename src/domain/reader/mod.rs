//! 阅读状态机
//!
//! 阅读位置是 (novel, chapter, page) 三元组，作为值在请求间传递，
//! 每次迁移返回新位置与迁移结果，而不是修改某个全局会话。

mod machine;
mod outline;
mod position;

pub use machine::{Boundary, NavAction, NavAvailability, NavOutcome, Navigation};
pub use outline::ChapterOutline;
pub use position::ReaderPosition;
