//! 定义了整个网关通用的、与具体音乐平台无关的核心数据模型。
//!
//! 这些结构体（如 `Song`, `ToplistEntry`, `Playlist`）是所有平台的原始响应
//! 在经过规范化之后需要转换成的目标标准格式。所有字段在缺失时都取空字符串或零，
//! 调用方永远不需要判断字段是否存在。

use serde::{Deserialize, Serialize};

use crate::model::source::Source;

/// 代表一首歌曲的通用模型。
///
/// `id` 只在其所属平台内唯一，`(source, id)` 才是全局唯一的自然键。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// 歌曲在其所在平台的 ID，统一为字符串。
    pub id: String,
    /// 歌曲名。
    pub name: String,
    /// 以 `, ` 连接的演唱者名称。
    pub artist: String,
    /// 歌曲所属专辑名。
    pub album: String,
    /// 实际产出这条数据的平台，由网关在返回前附加。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl Song {
    /// 返回附加了来源标记的歌曲副本。
    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }
}

/// 为一组歌曲统一附加来源标记。
pub fn attach_source(songs: Vec<Song>, source: Source) -> Vec<Song> {
    songs.into_iter().map(|song| song.with_source(source)).collect()
}

/// 代表一个排行榜条目的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToplistEntry {
    /// 榜单 ID。
    pub id: String,
    /// 榜单名。
    pub name: String,
    /// 榜单封面图片 URL。
    pub pic: String,
    /// 榜单更新频率的描述文字。
    pub update_frequency: String,
}

/// 歌单的基本信息。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    /// 歌单名。
    pub name: String,
    /// 歌单封面图片 URL。
    pub pic: String,
    /// 歌单描述。
    pub desc: String,
    /// 歌单创建者昵称。
    pub author: String,
    /// 播放次数。
    pub play_count: u64,
}

/// 代表一个歌单的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// 歌单的基本信息。
    pub info: PlaylistInfo,
    /// 歌单包含的歌曲列表。
    pub list: Vec<Song>,
}

impl Playlist {
    /// 为歌单中的每首歌曲附加来源标记。
    #[must_use]
    pub fn with_source(self, source: Source) -> Self {
        Self {
            info: self.info,
            list: attach_source(self.list, source),
        }
    }
}
