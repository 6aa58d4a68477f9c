use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use music_gateway_rs::{GatewayConfig, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,music_gateway_rs=debug"));
    FmtSubscriber::builder().with_env_filter(filter).init();

    let config = GatewayConfig::load().context("加载配置失败")?;
    if config.api_key.is_none() {
        warn!("未配置 music_parser_key，所有依赖 TuneHub 的接口都会返回 500。");
    }
    info!(
        "TuneHub: {}，限流: 每分钟 {} 次，静态目录: {}",
        config.hub_base_url,
        config.rate_limit_per_minute,
        config.static_dir.display()
    );

    server::serve(&config, shutdown_signal())
        .await
        .context("服务异常退出")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("无法监听 Ctrl+C 信号: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到 Ctrl+C，正在关闭服务...");
}
