//! HTTP Layer - 阅读页 HTML + JSON API

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;

pub use error::{ApiError, PageError};
pub use routes::create_routes;
pub use server::{build_router, HttpServer, ServerConfig};
pub use state::AppState;
