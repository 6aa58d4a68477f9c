//! 定义了网关支持的音乐源与功能，两者都是封闭的枚举。

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::GatewayError;

/// 网关支持的音乐平台。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Source {
    /// 网易云音乐
    #[default]
    Netease,
    /// QQ 音乐
    Qq,
    /// 酷我音乐
    Kuwo,
}

impl Source {
    /// 搜索时依次尝试的平台顺序，第一个总是被请求的平台本身。
    #[must_use]
    pub fn fallback_order(self) -> [Source; 3] {
        match self {
            Source::Netease => [Source::Netease, Source::Kuwo, Source::Qq],
            Source::Qq => [Source::Qq, Source::Kuwo, Source::Netease],
            Source::Kuwo => [Source::Kuwo, Source::Netease, Source::Qq],
        }
    }

    /// 解析调用方传入的 `source` 参数，缺省时为网易云音乐。
    pub fn parse_param(raw: Option<&str>) -> Result<Self, GatewayError> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Ok(Self::default());
        }
        raw.parse()
            .map_err(|_| GatewayError::Unsupported("source 只支持 netease / qq / kuwo".to_string()))
    }
}

/// 方法配置服务提供的功能。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Function {
    /// 搜索歌曲
    Search,
    /// 获取排行榜列表
    Toplists,
    /// 获取单个排行榜的歌曲
    Toplist,
    /// 获取歌单详情
    Playlist,
}

impl Function {
    /// 解析路径中的功能名。
    pub fn parse_param(raw: &str) -> Result<Self, GatewayError> {
        raw.parse().map_err(|_| {
            GatewayError::Unsupported(
                "function 只支持 search/toplists/toplist/playlist".to_string(),
            )
        })
    }
}
