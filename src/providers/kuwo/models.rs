//! 此模块定义了用于反序列化酷我音乐接口响应的数据结构。

use serde::Deserialize;
use serde_json::Value;

use crate::providers::de;

/// 搜索接口的顶层响应结构。
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    /// 搜索结果列表。
    #[serde(default, deserialize_with = "de::list")]
    pub abslist: Vec<SearchItem>,
}

/// 搜索接口中的一首歌曲，字段名全部大写。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SearchItem {
    /// 形如 `MUSIC_123456` 的歌曲 ID。
    #[serde(default, deserialize_with = "de::string")]
    pub musicrid: String,
    /// 歌名。
    #[serde(default, deserialize_with = "de::string")]
    pub songname: String,
    /// 歌名的另一种字段。
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    /// 歌手，多个歌手以 `&` 分隔。
    #[serde(default, deserialize_with = "de::string")]
    pub artist: String,
    /// 专辑名。
    #[serde(default, deserialize_with = "de::string")]
    pub album: String,
}

/// 榜单列表接口的顶层响应结构。
#[derive(Debug, Default, Deserialize)]
pub struct ToplistsResponse {
    /// 榜单目录下的所有节点。
    #[serde(default, deserialize_with = "de::list")]
    pub child: Vec<ToplistNode>,
}

/// 榜单目录中的节点，只有 `source == "1"` 的节点是真正的榜单。
#[derive(Debug, Default, Deserialize)]
pub struct ToplistNode {
    /// 节点类型。
    #[serde(default)]
    pub source: Value,
    /// 榜单 ID。
    #[serde(default, deserialize_with = "de::string")]
    pub sourceid: String,
    /// 榜单名。
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    /// 榜单封面。
    #[serde(default, deserialize_with = "de::string")]
    pub pic: String,
    /// 更新说明。
    #[serde(default, deserialize_with = "de::string")]
    pub info: String,
}

impl ToplistNode {
    /// 是否为真正的榜单节点。
    pub fn is_chart(&self) -> bool {
        self.source.as_str() == Some("1")
    }
}

/// 榜单详情接口的顶层响应结构。
#[derive(Debug, Default, Deserialize)]
pub struct ToplistResponse {
    /// 榜单中的歌曲。
    #[serde(default, deserialize_with = "de::list")]
    pub musiclist: Vec<Track>,
}

/// 歌单接口的顶层响应结构。`result` 不为 `"ok"` 表示歌单不存在。
#[derive(Debug, Default, Deserialize)]
pub struct PlaylistResponse {
    /// 业务结果标记。
    #[serde(default)]
    pub result: Value,
    /// 歌单名。
    #[serde(default, deserialize_with = "de::string")]
    pub title: String,
    /// 歌单封面。
    #[serde(default, deserialize_with = "de::string")]
    pub pic: String,
    /// 歌单简介。
    #[serde(default, deserialize_with = "de::string")]
    pub info: String,
    /// 创建者昵称。
    #[serde(default, deserialize_with = "de::string")]
    pub uname: String,
    /// 播放次数。
    #[serde(default, deserialize_with = "de::count")]
    pub playnum: u64,
    /// 歌曲列表。
    #[serde(default, deserialize_with = "de::list")]
    pub musiclist: Vec<Track>,
}

impl PlaylistResponse {
    /// 接口是否成功返回了歌单。
    pub fn is_ok(&self) -> bool {
        self.result.as_str() == Some("ok")
    }
}

/// 榜单与歌单接口中的歌曲。
#[derive(Debug, Default, Deserialize)]
pub struct Track {
    /// 歌曲 ID。
    #[serde(default, deserialize_with = "de::string")]
    pub id: String,
    /// 部分接口使用 `rid` 作为歌曲 ID。
    #[serde(default, deserialize_with = "de::string")]
    pub rid: String,
    /// 歌名。
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    /// 歌手，多个歌手以 `&` 分隔。
    #[serde(default, deserialize_with = "de::string")]
    pub artist: String,
    /// 专辑名。
    #[serde(default, deserialize_with = "de::string")]
    pub album: String,
}
