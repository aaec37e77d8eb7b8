//! HTTP Handlers

mod catalog;
mod editor;
mod ping;
mod reader;

pub use catalog::*;
pub use editor::*;
pub use ping::*;
pub use reader::*;
