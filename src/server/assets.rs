//! 静态页面。找不到的路径如果不像文件名（不含 `.`），就交给单页应用的 `index.html`。

use std::{convert::Infallible, path::Path};

use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{self, StatusCode},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::debug;

/// 构造静态页面的路由，作为整个应用的兜底服务。
pub fn router(static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .fallback(serve_asset)
        .with_state(ServeDir::new(static_dir.as_ref()))
}

async fn serve_asset(State(dir): State<ServeDir>, request: Request) -> Response {
    let looks_like_file = request.uri().path().contains('.');
    let response = serve(&dir, request).await;

    if response.status() != StatusCode::NOT_FOUND || looks_like_file {
        return response;
    }

    debug!("静态文件不存在，回退到 index.html");
    match http::Request::builder().uri("/index.html").body(Body::empty()) {
        Ok(index) => serve(&dir, index).await,
        Err(_) => response,
    }
}

async fn serve(dir: &ServeDir, request: Request) -> Response {
    let result: Result<_, Infallible> = dir.clone().oneshot(request).await;
    match result {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
