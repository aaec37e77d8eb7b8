//! Memory Layer - In-Memory State Management
//!
//! 实现 SessionStore，保存每个浏览器的阅读位置与展示偏好

mod session_store;

pub use session_store::{spawn_session_sweeper, InMemorySessionStore};
