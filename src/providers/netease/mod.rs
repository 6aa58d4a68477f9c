//! 网易云音乐响应的规范化。

use serde_json::Value;

use crate::{
    model::generic::{Playlist, PlaylistInfo, Song, ToplistEntry},
    providers::de,
};

pub mod models;

/// `result.songs[]` → 歌曲列表。
pub fn search(raw: Value) -> Vec<Song> {
    let resp: models::SearchResponse = de::from_raw(raw);
    resp.result.songs.into_iter().map(Into::into).collect()
}

/// `list[]` → 榜单列表。
pub fn toplists(raw: Value) -> Vec<ToplistEntry> {
    let resp: models::ToplistsResponse = de::from_raw(raw);
    resp.list
        .into_iter()
        .map(|item| ToplistEntry {
            id: item.id,
            name: item.name,
            pic: item.cover_img_url,
            update_frequency: item.update_frequency,
        })
        .collect()
}

/// `result.tracks[]` → 歌曲列表。
pub fn toplist(raw: Value) -> Vec<Song> {
    let resp: models::ToplistResponse = de::from_raw(raw);
    resp.result.tracks.into_iter().map(Into::into).collect()
}

/// `result` → 歌单；`result` 缺失时返回 `None`。
pub fn playlist(raw: Value) -> Option<Playlist> {
    let resp: models::PlaylistResponse = de::from_raw(raw);
    let detail = resp.result?;
    Some(Playlist {
        info: PlaylistInfo {
            name: detail.name,
            pic: detail.cover_img_url,
            desc: detail.description,
            author: detail.creator.nickname,
            play_count: detail.play_count,
        },
        list: detail.tracks.into_iter().map(Into::into).collect(),
    })
}

impl From<models::Track> for Song {
    fn from(track: models::Track) -> Self {
        Song {
            id: track.id,
            name: track.name,
            artist: track
                .artists
                .into_iter()
                .map(|a| a.name)
                .collect::<Vec<_>>()
                .join(", "),
            album: track.album.name,
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track_fixture() -> Value {
        json!({
            "id": 186016,
            "name": "晴天",
            "artists": [{ "id": 6452, "name": "周杰伦" }, { "id": 1, "name": "客串" }],
            "album": { "id": 18905, "name": "叶惠美" }
        })
    }

    #[test]
    fn test_search() {
        let raw = json!({ "code": 200, "result": { "songs": [track_fixture()], "songCount": 1 } });
        let songs = search(raw);
        assert_eq!(
            songs,
            vec![Song {
                id: "186016".into(),
                name: "晴天".into(),
                artist: "周杰伦, 客串".into(),
                album: "叶惠美".into(),
                source: None,
            }]
        );
    }

    #[test]
    fn test_search_with_missing_fields() {
        let raw = json!({ "result": { "songs": [{ "id": 1 }] } });
        let songs = search(raw);
        assert_eq!(songs[0].id, "1");
        assert_eq!(songs[0].name, "");
        assert_eq!(songs[0].artist, "");
        assert_eq!(songs[0].album, "");

        assert!(search(json!({ "code": 400 })).is_empty());
    }

    #[test]
    fn test_toplists() {
        let raw = json!({
            "list": [{
                "id": 19723756,
                "name": "飙升榜",
                "coverImgUrl": "https://p1.music.126.net/a.jpg",
                "updateFrequency": "每天更新"
            }]
        });
        assert_eq!(
            toplists(raw),
            vec![ToplistEntry {
                id: "19723756".into(),
                name: "飙升榜".into(),
                pic: "https://p1.music.126.net/a.jpg".into(),
                update_frequency: "每天更新".into(),
            }]
        );
    }

    #[test]
    fn test_toplist() {
        let raw = json!({ "result": { "tracks": [track_fixture(), track_fixture()] } });
        let songs = toplist(raw);
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[1].album, "叶惠美");
    }

    #[test]
    fn test_playlist() {
        let raw = json!({
            "code": 200,
            "result": {
                "name": "华语经典",
                "coverImgUrl": "https://p1.music.126.net/b.jpg",
                "description": "老歌",
                "creator": { "nickname": "云村用户" },
                "playCount": 123456,
                "tracks": [track_fixture()]
            }
        });
        let playlist = playlist(raw).expect("歌单应存在");
        assert_eq!(
            playlist.info,
            PlaylistInfo {
                name: "华语经典".into(),
                pic: "https://p1.music.126.net/b.jpg".into(),
                desc: "老歌".into(),
                author: "云村用户".into(),
                play_count: 123456,
            }
        );
        assert_eq!(playlist.list[0].id, "186016");
    }

    #[test]
    fn test_playlist_not_found() {
        assert!(playlist(json!({ "code": 404 })).is_none());
        assert!(playlist(json!({ "code": 200, "result": null })).is_none());
    }
}
