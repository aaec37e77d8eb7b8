//! Novel Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NovelError {
    #[error("无效的 slug: {0}")]
    InvalidSlug(String),

    #[error("无效的标题: {0}")]
    InvalidTitle(String),
}
