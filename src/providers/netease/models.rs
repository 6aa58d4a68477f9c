//! 此模块定义了用于反序列化网易云音乐接口响应的数据结构。
//!
//! 所有字段都经过宽容处理，字段缺失或类型不符时取默认值。

use serde::Deserialize;

use crate::providers::de;

// =================================================================
// 搜索接口的模型
// =================================================================

/// 搜索接口的顶层响应结构。
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    /// 包含搜索结果的容器。
    #[serde(default, deserialize_with = "de::or_default")]
    pub result: SearchData,
}

/// 搜索结果的数据部分。
#[derive(Debug, Default, Deserialize)]
pub struct SearchData {
    /// 匹配到的歌曲列表。
    #[serde(default, deserialize_with = "de::list")]
    pub songs: Vec<Track>,
}

// =================================================================
// 榜单列表接口的模型
// =================================================================

/// 榜单列表接口的顶层响应结构。
#[derive(Debug, Default, Deserialize)]
pub struct ToplistsResponse {
    /// 全部榜单。
    #[serde(default, deserialize_with = "de::list")]
    pub list: Vec<TopList>,
}

/// 单个榜单的概要信息。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopList {
    /// 榜单 ID（数字）。
    #[serde(default, deserialize_with = "de::string")]
    pub id: String,
    /// 榜单名。
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    /// 榜单封面。
    #[serde(default, deserialize_with = "de::string")]
    pub cover_img_url: String,
    /// 更新频率的描述，例如 "每天更新"。
    #[serde(default, deserialize_with = "de::string")]
    pub update_frequency: String,
}

// =================================================================
// 榜单详情与歌单详情接口的模型
// =================================================================

/// 榜单详情接口的顶层响应结构。
#[derive(Debug, Default, Deserialize)]
pub struct ToplistResponse {
    /// 榜单内容。
    #[serde(default, deserialize_with = "de::or_default")]
    pub result: TrackContainer,
}

/// 只关心其中歌曲列表的容器。
#[derive(Debug, Default, Deserialize)]
pub struct TrackContainer {
    /// 歌曲列表。
    #[serde(default, deserialize_with = "de::list")]
    pub tracks: Vec<Track>,
}

/// 歌单详情接口的顶层响应结构。`result` 缺失表示歌单不存在。
#[derive(Debug, Default, Deserialize)]
pub struct PlaylistResponse {
    /// 歌单详情。
    #[serde(default, deserialize_with = "de::or_default")]
    pub result: Option<PlaylistDetail>,
}

/// 歌单详情。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDetail {
    /// 歌单名。
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    /// 歌单封面。
    #[serde(default, deserialize_with = "de::string")]
    pub cover_img_url: String,
    /// 歌单描述。
    #[serde(default, deserialize_with = "de::string")]
    pub description: String,
    /// 创建者。
    #[serde(default, deserialize_with = "de::or_default")]
    pub creator: Creator,
    /// 播放次数。
    #[serde(default, deserialize_with = "de::count")]
    pub play_count: u64,
    /// 歌曲列表。
    #[serde(default, deserialize_with = "de::list")]
    pub tracks: Vec<Track>,
}

/// 歌单创建者。
#[derive(Debug, Default, Deserialize)]
pub struct Creator {
    /// 昵称。
    #[serde(default, deserialize_with = "de::string")]
    pub nickname: String,
}

// =================================================================
// 通用的歌曲模型，在多个接口中复用
// =================================================================

/// 代表一首歌曲。
#[derive(Debug, Default, Deserialize)]
pub struct Track {
    /// 歌曲的数字 ID。
    #[serde(default, deserialize_with = "de::string")]
    pub id: String,
    /// 歌曲名。
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    /// 艺术家列表。
    #[serde(default, deserialize_with = "de::list")]
    pub artists: Vec<Artist>,
    /// 所属专辑。
    #[serde(default, deserialize_with = "de::or_default")]
    pub album: NamedRef,
}

/// 艺术家。
#[derive(Debug, Default, Deserialize)]
pub struct Artist {
    /// 艺术家名。
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
}

/// 只带名字的引用，例如专辑。
#[derive(Debug, Default, Deserialize)]
pub struct NamedRef {
    /// 名称。
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
}
