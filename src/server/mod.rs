//! HTTP 服务
//!
//! `/api` 下是网关接口，其余路径由静态页面兜底。

use std::{path::Path, sync::Arc};

use axum::{
    Router, middleware,
    routing::{any, get},
};
use tokio::net::TcpListener;
use tracing::info;

use crate::{MusicGateway, config::GatewayConfig, error::Result, limiter::RateLimiter};

pub mod assets;
pub mod envelope;
pub mod guard;
pub mod handlers;
pub mod params;

/// 所有处理函数共享的状态。
#[derive(Clone)]
pub struct AppState {
    /// 网关客户端。
    pub gateway: Arc<MusicGateway>,
    /// 限流器。
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// 根据配置创建状态。
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        Ok(Self {
            gateway: Arc::new(MusicGateway::new(config)?),
            limiter: Arc::new(RateLimiter::new(
                config.rate_limit_per_minute,
                crate::limiter::DEFAULT_PURGE_EVERY,
            )),
        })
    }
}

/// 构造完整的应用路由。
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .nest("/api", api_router(state))
        .fallback_service(assets::router(static_dir))
}

fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", any(handlers::health))
        .route("/search", get(handlers::search).fallback(handlers::only_get))
        .route("/toplists", get(handlers::toplists).fallback(handlers::only_get))
        .route("/toplist", get(handlers::toplist).fallback(handlers::only_get))
        .route("/playlist", get(handlers::playlist).fallback(handlers::only_get))
        .route(
            "/parse",
            get(handlers::parse_get)
                .post(handlers::parse_post)
                .fallback(handlers::only_get_or_post),
        )
        .route("/methods", get(handlers::methods).fallback(handlers::only_get))
        .route(
            "/methods/{source}",
            get(handlers::source_methods).fallback(handlers::only_get),
        )
        .route(
            "/methods/{source}/{function}",
            get(handlers::function_method).fallback(handlers::only_get),
        )
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), guard::api_guard))
        .with_state(state)
}

/// 绑定地址并运行服务，直到 `shutdown` 完成。
pub async fn serve<F>(config: &GatewayConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = AppState::from_config(config)?;
    let app = router(state, &config.static_dir);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("服务已启动，监听 {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("服务已停止。");
    Ok(())
}
