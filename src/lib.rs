#![warn(missing_docs)]

//! # Music Gateway RS
//!
//! 一个把多个互不兼容的音乐平台接口统一成同一套 JSON 接口的网关。
//!
//! ## 主要功能
//!
//! - **声明式调用**: 每个平台每个功能的请求方式由远端的方法配置描述，
//!   网关负责把调用变量代入模板、组装请求并执行。
//! - **统一的数据模型**: 网易云音乐、QQ 音乐、酷我音乐的响应都被规范化为
//!   [`Song`]、[`ToplistEntry`]、[`Playlist`]。
//! - **回退搜索**: 首选平台没有结果时按固定顺序尝试其他平台。
//! - **HTTP 服务**: [`server`] 模块提供带限流和跨域支持的 axum 路由。
//!
//! ## 搜索歌曲
//!
//! ```rust,no_run
//! use music_gateway_rs::{GatewayConfig, MusicGateway, Source};
//!
//! async {
//!     let config = GatewayConfig::load().unwrap();
//!     let gateway = MusicGateway::new(&config).unwrap();
//!
//!     let outcome = gateway.search(Source::Netease, "晴天", 1, 10).await.unwrap();
//!     println!("来自 {} 的 {} 条结果", outcome.actual_source, outcome.results.len());
//! };
//! ```
pub mod config;
pub mod error;
pub mod hub;
pub mod limiter;
pub mod model;
pub mod providers;
pub mod search;
pub mod server;
pub mod template;
pub mod upstream;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

pub use crate::{
    config::GatewayConfig,
    error::{GatewayError, Result},
    model::{
        generic::{Playlist, PlaylistInfo, Song, ToplistEntry},
        source::{Function, Source},
        vars::{CallVars, ParseRequest},
    },
    search::SearchOutcome,
};

use crate::{
    hub::HubClient,
    model::generic::attach_source,
    providers::Normalized,
    search::MethodRunner,
    upstream::UpstreamExecutor,
};

// ==========================================================
//  顶层 API
// ==========================================================

/// 顶层网关客户端，为所有平台提供统一、简单的接口。
///
/// 这是与本库交互的主要入口点。内部持有的 HTTP 客户端可以被廉价地共享。
#[derive(Debug, Clone)]
pub struct MusicGateway {
    hub: HubClient,
    executor: UpstreamExecutor,
}

impl MusicGateway {
    /// 根据配置创建网关。所有出站请求共享同一个带超时的 HTTP 客户端。
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            hub: HubClient::new(
                http_client.clone(),
                config.hub_base_url.clone(),
                config.api_key.clone(),
            ),
            executor: UpstreamExecutor::new(http_client),
        })
    }

    /// 带回退的歌曲搜索。
    ///
    /// # 参数
    /// * `source` - 首选平台。
    /// * `keyword` - 搜索关键词，首尾空白会被去掉，不能为空。
    /// * `page` - 页码，从 1 开始。
    /// * `limit` - 每页条数。
    ///
    /// # 返回
    /// 成功时返回 [`SearchOutcome`]。上游故障不会导致失败，只会让结果为空；
    /// 但未配置 API Key 时直接返回 `GatewayError::Config`。
    pub async fn search(
        &self,
        source: Source,
        keyword: &str,
        page: u32,
        limit: u32,
    ) -> Result<SearchOutcome> {
        let keyword = required(keyword, "keyword 不能为空")?;
        self.hub.api_key()?;
        let vars = CallVars::for_search(keyword, page, limit);
        Ok(search::search_with_fallback(self, source, &vars).await)
    }

    /// 获取某个平台的全部排行榜。
    pub async fn toplists(&self, source: Source) -> Result<Vec<ToplistEntry>> {
        self.run_method(source, Function::Toplists, &CallVars::default())
            .await?
            .into_toplists()
    }

    /// 获取某个排行榜中的歌曲，歌曲会附加来源标记。
    pub async fn toplist(&self, source: Source, id: &str) -> Result<Vec<Song>> {
        let id = required(id, "id 不能为空")?;
        let songs = self
            .run_method(source, Function::Toplist, &CallVars::for_id(id))
            .await?
            .into_songs()?;
        Ok(attach_source(songs, source))
    }

    /// 获取歌单详情，歌单不存在时返回 `None`。
    pub async fn playlist(&self, source: Source, id: &str) -> Result<Option<Playlist>> {
        let id = required(id, "id 不能为空")?;
        let playlist = self
            .run_method(source, Function::Playlist, &CallVars::for_id(id))
            .await?
            .into_playlist()?;
        Ok(playlist.map(|p| p.with_source(source)))
    }

    /// 解析歌曲的播放链接，结果原样返回。
    pub async fn parse(&self, request: &ParseRequest) -> Result<Value> {
        let ids = required(&request.ids, "id 或 ids 不能为空")?;
        info!("解析 {} 平台的歌曲链接: {}", request.source, ids);
        self.hub.parse(request.source, ids, &request.quality).await
    }

    /// 查看方法配置，结果原样返回。
    pub async fn methods(&self, source: Option<Source>, function: Option<Function>) -> Result<Value> {
        self.hub.methods(source, function).await
    }
}

#[async_trait]
impl MethodRunner for MusicGateway {
    async fn run_method(
        &self,
        source: Source,
        function: Function,
        vars: &CallVars,
    ) -> Result<Normalized> {
        let config = self.hub.method_config(source, function).await?;
        let descriptor = upstream::build(&config, vars)?;
        debug!("{}/{} 组装的请求: {} {}", source, function, descriptor.method, descriptor.url);
        let raw = self.executor.execute(&descriptor).await?;
        Ok(providers::transform(source, function, raw))
    }
}

fn required<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(GatewayError::Validation(message.to_string()))
    } else {
        Ok(value)
    }
}
