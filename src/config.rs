//! 负责加载网关的运行配置。
//!
//! 配置先从 JSON 文件读取（文件不存在时使用默认值），再由环境变量覆盖。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{
    error::{GatewayError, Result},
    hub::DEFAULT_HUB_BASE_URL,
    limiter::DEFAULT_LIMIT_PER_MINUTE,
};

const CONFIG_DIR_NAME: &str = "music-gateway";
const CONFIG_FILE_NAME: &str = "config.json";

/// 网关的全部运行配置。所有字段都有默认值。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GatewayConfig {
    /// 访问方法配置服务所需的 API Key。
    pub api_key: Option<String>,
    /// 方法配置服务的地址。
    pub hub_base_url: String,
    /// 每个调用方每分钟允许的请求数。
    pub rate_limit_per_minute: u32,
    /// HTTP 服务监听的地址。
    pub bind_addr: String,
    /// 静态页面所在的目录。
    pub static_dir: PathBuf,
    /// 每次出站请求的超时时间（秒）。
    pub upstream_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            hub_base_url: DEFAULT_HUB_BASE_URL.to_string(),
            rate_limit_per_minute: DEFAULT_LIMIT_PER_MINUTE,
            bind_addr: "0.0.0.0:8787".to_string(),
            static_dir: PathBuf::from("public"),
            upstream_timeout_secs: 15,
        }
    }
}

impl GatewayConfig {
    /// 从默认位置加载配置，并应用进程环境变量的覆盖。
    ///
    /// 配置文件路径可以通过 `MUSIC_GATEWAY_CONFIG` 指定。
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os("MUSIC_GATEWAY_CONFIG") {
            Some(path) => Some(PathBuf::from(path)),
            None => default_config_path(),
        };

        let config = match path {
            Some(path) => Self::from_file(&path)?,
            None => {
                warn!("无法找到用户配置目录，使用默认配置。");
                Self::default()
            }
        };

        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// 从 JSON 文件加载配置。文件不存在时返回默认配置。
    pub fn from_file(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config = serde_json::from_str(&content).map_err(|e| {
                    GatewayError::Config(format!("配置文件 {} 格式错误: {e}", path.display()))
                })?;
                info!("已从 {} 加载配置。", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("配置文件 {} 不存在，使用默认配置。", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 使用 `lookup` 读取环境变量并覆盖对应字段。无法解析的数值会被忽略。
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup("music_parser_key").or_else(|| lookup("MUSIC_PARSER_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup("TUNEHUB_BASE_URL") {
            self.hub_base_url = url;
        }
        if let Some(limit) = parse_number(lookup("RATE_LIMIT_MAX_PER_MIN"), "RATE_LIMIT_MAX_PER_MIN")
        {
            self.rate_limit_per_minute = limit;
        }
        if let Some(addr) = lookup("MUSIC_GATEWAY_BIND") {
            self.bind_addr = addr;
        }
        if let Some(dir) = lookup("MUSIC_GATEWAY_STATIC_DIR") {
            self.static_dir = PathBuf::from(dir);
        }
        if let Some(secs) = parse_number(lookup("UPSTREAM_TIMEOUT_SECS"), "UPSTREAM_TIMEOUT_SECS") {
            self.upstream_timeout_secs = secs;
        }
        self
    }
}

fn parse_number<T: std::str::FromStr>(raw: Option<String>, key: &str) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("环境变量 {} 的值 '{}' 不是合法的数字，已忽略。", key, raw);
            None
        }
    }
}

/// 获取默认的配置文件路径，即用户配置目录下的 `music-gateway/config.json`。
pub fn default_config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push(CONFIG_DIR_NAME);
    path.push(CONFIG_FILE_NAME);
    Some(path)
}
