//! Rewrite Adapter - AI 改写客户端实现

mod disabled_rewrite_client;
mod http_rewrite_client;

pub use disabled_rewrite_client::DisabledRewriteClient;
pub use http_rewrite_client::*;
