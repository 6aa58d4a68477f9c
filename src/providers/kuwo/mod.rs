//! 酷我音乐响应的规范化。
//!
//! 酷我以 `&` 分隔多个歌手，这里统一替换为 `, `。

use serde_json::Value;

use crate::{
    model::generic::{Playlist, PlaylistInfo, Song, ToplistEntry},
    providers::de,
};

pub mod models;

const DEFAULT_UPDATE_FREQUENCY: &str = "Regular update";

/// `abslist[]` → 歌曲列表。
pub fn search(raw: Value) -> Vec<Song> {
    let resp: models::SearchResponse = de::from_raw(raw);
    resp.abslist
        .into_iter()
        .map(|item| Song {
            id: item.musicrid.replacen("MUSIC_", "", 1),
            name: if item.songname.is_empty() {
                item.name
            } else {
                item.songname
            },
            artist: join_artists(&item.artist),
            album: item.album,
            source: None,
        })
        .collect()
}

/// `child[]` 中 `source == "1"` 的节点 → 榜单列表。
pub fn toplists(raw: Value) -> Vec<ToplistEntry> {
    let resp: models::ToplistsResponse = de::from_raw(raw);
    resp.child
        .into_iter()
        .filter(models::ToplistNode::is_chart)
        .map(|node| ToplistEntry {
            id: node.sourceid,
            name: node.name,
            pic: node.pic,
            update_frequency: if node.info.is_empty() {
                DEFAULT_UPDATE_FREQUENCY.to_string()
            } else {
                node.info
            },
        })
        .collect()
}

/// `musiclist[]` → 歌曲列表。
pub fn toplist(raw: Value) -> Vec<Song> {
    let resp: models::ToplistResponse = de::from_raw(raw);
    resp.musiclist.into_iter().map(Into::into).collect()
}

/// 根节点 → 歌单；`result` 不为 `"ok"` 时返回 `None`。
pub fn playlist(raw: Value) -> Option<Playlist> {
    let resp: models::PlaylistResponse = de::from_raw(raw);
    if !resp.is_ok() {
        return None;
    }
    Some(Playlist {
        info: PlaylistInfo {
            name: resp.title,
            pic: resp.pic,
            desc: resp.info,
            author: resp.uname,
            play_count: resp.playnum,
        },
        list: resp.musiclist.into_iter().map(Into::into).collect(),
    })
}

fn join_artists(raw: &str) -> String {
    raw.replace('&', ", ")
}

impl From<models::Track> for Song {
    fn from(track: models::Track) -> Self {
        Song {
            id: if track.id.is_empty() { track.rid } else { track.id },
            name: track.name,
            artist: join_artists(&track.artist),
            album: track.album,
            source: None,
        }
    }
}
