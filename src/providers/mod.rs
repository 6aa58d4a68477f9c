//! 提供商模块
//!
//! 每个音乐平台一个子模块，负责把该平台对某个功能的原始响应规范化为通用模型。
//! 规范化是纯函数：不做任何 I/O，结构不匹配时退化为空列表或 `None`，从不返回错误。

use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{GatewayError, Result},
    model::{
        generic::{Playlist, Song, ToplistEntry},
        source::{Function, Source},
    },
};

pub mod de;
pub mod kuwo;
pub mod netease;
pub mod qq;

/// 规范化之后的结果，形状由调用的功能决定。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Normalized {
    /// `search` 与 `toplist` 的结果。
    Songs(Vec<Song>),
    /// `toplists` 的结果。
    Toplists(Vec<ToplistEntry>),
    /// `playlist` 的结果，歌单不存在时为 `None`。
    Playlist(Option<Playlist>),
}

impl Normalized {
    /// 取出歌曲列表。
    pub fn into_songs(self) -> Result<Vec<Song>> {
        match self {
            Self::Songs(songs) => Ok(songs),
            other => Err(shape_mismatch("歌曲列表", &other)),
        }
    }

    /// 取出榜单列表。
    pub fn into_toplists(self) -> Result<Vec<ToplistEntry>> {
        match self {
            Self::Toplists(entries) => Ok(entries),
            other => Err(shape_mismatch("榜单列表", &other)),
        }
    }

    /// 取出歌单。
    pub fn into_playlist(self) -> Result<Option<Playlist>> {
        match self {
            Self::Playlist(playlist) => Ok(playlist),
            other => Err(shape_mismatch("歌单", &other)),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Songs(_) => "歌曲列表",
            Self::Toplists(_) => "榜单列表",
            Self::Playlist(_) => "歌单",
        }
    }
}

fn shape_mismatch(expected: &str, actual: &Normalized) -> GatewayError {
    GatewayError::Internal(format!("期望得到{expected}，实际为{}", actual.kind()))
}

/// 按 `(平台, 功能)` 分派到对应的规范化函数。
pub fn transform(source: Source, function: Function, raw: Value) -> Normalized {
    match (source, function) {
        (Source::Netease, Function::Search) => Normalized::Songs(netease::search(raw)),
        (Source::Netease, Function::Toplists) => Normalized::Toplists(netease::toplists(raw)),
        (Source::Netease, Function::Toplist) => Normalized::Songs(netease::toplist(raw)),
        (Source::Netease, Function::Playlist) => Normalized::Playlist(netease::playlist(raw)),

        (Source::Qq, Function::Search) => Normalized::Songs(qq::search(raw)),
        (Source::Qq, Function::Toplists) => Normalized::Toplists(qq::toplists(raw)),
        (Source::Qq, Function::Toplist) => Normalized::Songs(qq::toplist(raw)),
        (Source::Qq, Function::Playlist) => Normalized::Playlist(qq::playlist(raw)),

        (Source::Kuwo, Function::Search) => Normalized::Songs(kuwo::search(raw)),
        (Source::Kuwo, Function::Toplists) => Normalized::Toplists(kuwo::toplists(raw)),
        (Source::Kuwo, Function::Toplist) => Normalized::Songs(kuwo::toplist(raw)),
        (Source::Kuwo, Function::Playlist) => Normalized::Playlist(kuwo::playlist(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_cell_has_the_right_shape() {
        for source in Source::iter() {
            for function in Function::iter() {
                let normalized = transform(source, function, json!({}));
                match (function, normalized) {
                    (Function::Search | Function::Toplist, Normalized::Songs(songs)) => {
                        assert!(songs.is_empty(), "{source}/{function}");
                    }
                    (Function::Toplists, Normalized::Toplists(entries)) => {
                        assert!(entries.is_empty(), "{source}/{function}");
                    }
                    (Function::Playlist, Normalized::Playlist(playlist)) => {
                        assert!(playlist.is_none(), "{source}/{function}");
                    }
                    (function, other) => panic!("{source}/{function} 得到了 {}", other.kind()),
                }
            }
        }
    }

    #[test]
    fn test_garbage_input_never_panics() {
        for source in Source::iter() {
            for function in Function::iter() {
                for raw in [json!(null), json!("text"), json!([1, 2]), json!(42)] {
                    let _ = transform(source, function, raw);
                }
            }
        }
    }

    #[test]
    fn test_dispatch_reaches_platform_transformer() {
        let raw = json!({ "abslist": [{ "MUSICRID": "MUSIC_7", "SONGNAME": "七里香" }] });
        let songs = transform(Source::Kuwo, Function::Search, raw)
            .into_songs()
            .unwrap();
        assert_eq!(songs[0].id, "7");
        assert_eq!(songs[0].name, "七里香");
    }

    #[test]
    fn test_shape_mismatch_is_internal_error() {
        let err = Normalized::Toplists(vec![]).into_songs().unwrap_err();
        assert!(matches!(err, GatewayError::Internal(_)));
        assert!(Normalized::Playlist(None).into_playlist().unwrap().is_none());
    }

    #[test]
    fn test_untagged_serialization() {
        assert_eq!(
            serde_json::to_value(Normalized::Playlist(None)).unwrap(),
            json!(null)
        );
        assert_eq!(
            serde_json::to_value(Normalized::Songs(vec![])).unwrap(),
            json!([])
        );
    }
}
