//! HTTP Middleware
//!
//! HTTP 状态码错误日志与慢请求日志中间件

use std::time::{Duration, Instant};

use axum::{extract::Request, middleware::Next, response::Response};

/// 超过该耗时的请求记录为慢请求（AI 改写除外）
const SLOW_REQUEST: Duration = Duration::from_millis(1000);

/// HTTP 状态码错误日志中间件
///
/// 4xx / 5xx 响应记录日志；API 业务错误（errno != 0）在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed = started.elapsed();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    } else if elapsed > SLOW_REQUEST && uri.path() != "/edit/rewrite" {
        tracing::warn!(
            method = %method,
            uri = %uri,
            elapsed_ms = elapsed.as_millis() as u64,
            "Slow request"
        );
    }

    response
}
