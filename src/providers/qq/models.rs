//! 此模块定义了用于反序列化 QQ 音乐接口响应的数据结构。

use serde::Deserialize;
use serde_json::Value;

use crate::providers::de;

// =================================================================
// 搜索接口 ( musicu.fcg 的 req 模块 ) 的模型
// =================================================================

/// 搜索接口的顶层响应结构，结果位于 `req.data.body.song.list`。
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    /// 搜索请求模块。
    #[serde(default, deserialize_with = "de::or_default")]
    pub req: SearchReq,
}

/// 搜索请求模块。
#[derive(Debug, Default, Deserialize)]
pub struct SearchReq {
    /// 数据部分。
    #[serde(default, deserialize_with = "de::or_default")]
    pub data: SearchData,
}

/// 搜索数据部分。
#[derive(Debug, Default, Deserialize)]
pub struct SearchData {
    /// 响应主体。
    #[serde(default, deserialize_with = "de::or_default")]
    pub body: SearchBody,
}

/// 搜索响应主体。
#[derive(Debug, Default, Deserialize)]
pub struct SearchBody {
    /// 歌曲搜索结果。
    #[serde(default, deserialize_with = "de::or_default")]
    pub song: SongList,
}

/// 歌曲列表容器。
#[derive(Debug, Default, Deserialize)]
pub struct SongList {
    /// 歌曲列表。
    #[serde(default, deserialize_with = "de::list")]
    pub list: Vec<QqSong>,
}

// =================================================================
// 榜单接口的模型
// =================================================================

/// 榜单列表接口的顶层响应结构，榜单按分组存放。
#[derive(Debug, Default, Deserialize)]
pub struct ToplistsResponse {
    /// 榜单模块。
    #[serde(default, deserialize_with = "de::or_default")]
    pub toplist: ToplistGroupsModule,
}

/// 榜单列表模块。
#[derive(Debug, Default, Deserialize)]
pub struct ToplistGroupsModule {
    /// 数据部分。
    #[serde(default, deserialize_with = "de::or_default")]
    pub data: ToplistGroups,
}

/// 榜单分组。
#[derive(Debug, Default, Deserialize)]
pub struct ToplistGroups {
    /// 所有分组。
    #[serde(default, deserialize_with = "de::list")]
    pub group: Vec<ToplistGroup>,
}

/// 单个榜单分组，例如“巅峰榜”。
#[derive(Debug, Default, Deserialize)]
pub struct ToplistGroup {
    /// 分组中的榜单。
    #[serde(default, deserialize_with = "de::list")]
    pub toplist: Vec<TopList>,
}

/// 单个榜单的概要信息。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopList {
    /// 榜单 ID。
    #[serde(default, deserialize_with = "de::string")]
    pub top_id: String,
    /// 榜单名。
    #[serde(default, deserialize_with = "de::string")]
    pub title: String,
    /// 头图。
    #[serde(default, deserialize_with = "de::string")]
    pub head_pic_url: String,
    /// 封面图，头图缺失时使用。
    #[serde(default, deserialize_with = "de::string")]
    pub front_pic_url: String,
    /// 更新类型，`1` 表示每日更新。
    #[serde(default)]
    pub update_type: Value,
}

/// 榜单详情接口的顶层响应结构，歌曲位于 `toplist.data.songInfoList`。
#[derive(Debug, Default, Deserialize)]
pub struct ToplistResponse {
    /// 榜单模块。
    #[serde(default, deserialize_with = "de::or_default")]
    pub toplist: ToplistDetailModule,
}

/// 榜单详情模块。
#[derive(Debug, Default, Deserialize)]
pub struct ToplistDetailModule {
    /// 数据部分。
    #[serde(default, deserialize_with = "de::or_default")]
    pub data: ToplistDetail,
}

/// 榜单详情。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToplistDetail {
    /// 榜单中的歌曲。
    #[serde(default, deserialize_with = "de::list")]
    pub song_info_list: Vec<QqSong>,
}

// =================================================================
// 歌单接口的模型
// =================================================================

/// 歌单接口的顶层响应结构。`cdlist` 为空表示歌单不存在。
#[derive(Debug, Default, Deserialize)]
pub struct PlaylistResponse {
    /// 歌单列表，只使用第一个。
    #[serde(default, deserialize_with = "de::list")]
    pub cdlist: Vec<Disc>,
}

/// 歌单详情。
#[derive(Debug, Default, Deserialize)]
pub struct Disc {
    /// 歌单名。
    #[serde(default, deserialize_with = "de::string")]
    pub dissname: String,
    /// 歌单封面。
    #[serde(default, deserialize_with = "de::string")]
    pub logo: String,
    /// 歌单描述，使用 `<br>` 换行。
    #[serde(default, deserialize_with = "de::string")]
    pub desc: String,
    /// 创建者昵称。
    #[serde(default, deserialize_with = "de::string")]
    pub nickname: String,
    /// 访问次数。
    #[serde(default, deserialize_with = "de::count")]
    pub visitnum: u64,
    /// 歌曲列表。
    #[serde(default, deserialize_with = "de::list")]
    pub songlist: Vec<QqSong>,
}

// =================================================================
// 通用的歌曲模型，在多个接口中复用
// =================================================================

/// 代表一首歌曲。不同接口使用不同的字段存放歌名与歌手。
#[derive(Debug, Default, Deserialize)]
pub struct QqSong {
    /// 歌曲的 `mid`，作为对外的歌曲 ID。
    #[serde(default, deserialize_with = "de::string")]
    pub mid: String,
    /// 歌名（搜索接口）。
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    /// 歌名（榜单与歌单接口）。
    #[serde(default, deserialize_with = "de::string")]
    pub title: String,
    /// 所属专辑。
    #[serde(default, deserialize_with = "de::or_default")]
    pub album: AlbumRef,
    /// 专辑名（榜单接口）。
    #[serde(rename = "albumName", default, deserialize_with = "de::string")]
    pub album_name: String,
    /// 歌手列表（部分接口）。
    #[serde(rename = "singerList", default, deserialize_with = "de::opt_list")]
    pub singer_list: Option<Vec<Singer>>,
    /// 歌手列表。
    #[serde(default, deserialize_with = "de::opt_list")]
    pub singer: Option<Vec<Singer>>,
    /// 以字符串给出的歌手名。
    #[serde(rename = "singerName", default, deserialize_with = "de::opt_string")]
    pub singer_name_camel: Option<String>,
    /// 以字符串给出的歌手名。
    #[serde(rename = "singer_name", default, deserialize_with = "de::opt_string")]
    pub singer_name_snake: Option<String>,
    /// 以字符串给出的歌手名。
    #[serde(default, deserialize_with = "de::opt_string")]
    pub singername: Option<String>,
}

/// 歌手。
#[derive(Debug, Default, Deserialize)]
pub struct Singer {
    /// 歌手名。
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
}

/// 专辑引用。
#[derive(Debug, Default, Deserialize)]
pub struct AlbumRef {
    /// 专辑名。
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
}
