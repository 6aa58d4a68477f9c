//! QQ 音乐响应的规范化。
//!
//! QQ 音乐的歌手信息分散在多个字段中：`singerList`、`singer` 两种数组形式，
//! 以及 `singerName`、`singer_name`、`singername` 三种字符串形式。

use serde_json::Value;

use crate::{
    model::generic::{Playlist, PlaylistInfo, Song, ToplistEntry},
    providers::de,
};

pub mod models;

/// `req.data.body.song.list[]` → 歌曲列表。
pub fn search(raw: Value) -> Vec<Song> {
    let resp: models::SearchResponse = de::from_raw(raw);
    resp.req
        .data
        .body
        .song
        .list
        .into_iter()
        .map(|item| Song {
            artist: artist_names(&item),
            id: item.mid,
            name: item.name,
            album: item.album.name,
            source: None,
        })
        .collect()
}

/// `toplist.data.group[].toplist[]` → 扁平化的榜单列表。
pub fn toplists(raw: Value) -> Vec<ToplistEntry> {
    let resp: models::ToplistsResponse = de::from_raw(raw);
    resp.toplist
        .data
        .group
        .into_iter()
        .flat_map(|group| group.toplist)
        .map(|item| ToplistEntry {
            update_frequency: if item.update_type.as_i64() == Some(1) {
                "Daily".to_string()
            } else {
                "Weekly".to_string()
            },
            id: item.top_id,
            name: item.title,
            pic: first_non_empty(item.head_pic_url, item.front_pic_url),
        })
        .collect()
}

/// `toplist.data.songInfoList[]` → 歌曲列表。
pub fn toplist(raw: Value) -> Vec<Song> {
    let resp: models::ToplistResponse = de::from_raw(raw);
    resp.toplist
        .data
        .song_info_list
        .into_iter()
        .map(|item| Song {
            artist: artist_names(&item),
            id: item.mid,
            name: item.title,
            album: first_non_empty(item.album_name, item.album.name),
            source: None,
        })
        .collect()
}

/// `cdlist[0]` → 歌单；`cdlist` 为空时返回 `None`。
pub fn playlist(raw: Value) -> Option<Playlist> {
    let resp: models::PlaylistResponse = de::from_raw(raw);
    let disc = resp.cdlist.into_iter().next()?;
    Some(Playlist {
        info: PlaylistInfo {
            name: disc.dissname,
            pic: disc.logo,
            desc: disc.desc.replace("<br>", "\n"),
            author: disc.nickname,
            play_count: disc.visitnum,
        },
        list: disc
            .songlist
            .into_iter()
            .map(|item| Song {
                artist: artist_names(&item),
                id: item.mid,
                name: item.title,
                album: item.album.name,
                source: None,
            })
            .collect(),
    })
}

/// 从歌曲的多个候选字段中取出歌手名，多个歌手以 `, ` 连接。
fn artist_names(item: &models::QqSong) -> String {
    if let Some(singers) = item.singer_list.as_ref().or(item.singer.as_ref()) {
        return singers
            .iter()
            .map(|s| s.name.as_str())
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
    }

    item.singer_name_camel
        .as_ref()
        .or(item.singer_name_snake.as_ref())
        .or(item.singername.as_ref())
        .cloned()
        .unwrap_or_default()
}

fn first_non_empty(primary: String, fallback: String) -> String {
    if primary.is_empty() { fallback } else { primary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search() {
        let raw = json!({
            "code": 0,
            "req": { "code": 0, "data": { "body": { "song": { "list": [{
                "mid": "0039MnYb0qxYhV",
                "name": "晴天",
                "singer": [{ "mid": "0025NhlN2yWrP4", "name": "周杰伦" }],
                "album": { "mid": "000MkMni19ClKG", "name": "叶惠美" }
            }] } } } }
        });
        assert_eq!(
            search(raw),
            vec![Song {
                id: "0039MnYb0qxYhV".into(),
                name: "晴天".into(),
                artist: "周杰伦".into(),
                album: "叶惠美".into(),
                source: None,
            }]
        );
    }

    #[test]
    fn test_artist_name_priority() {
        let item: models::QqSong = de::from_raw(json!({
            "singerList": [{ "name": "A" }, { "name": "" }, null, { "name": "B" }],
            "singer": [{ "name": "ignored" }],
            "singerName": "ignored too"
        }));
        assert_eq!(artist_names(&item), "A, B");

        let item: models::QqSong = de::from_raw(json!({ "singer_name": "C", "singername": "D" }));
        assert_eq!(artist_names(&item), "C");

        let item: models::QqSong = de::from_raw(json!({ "singername": "D" }));
        assert_eq!(artist_names(&item), "D");

        let item: models::QqSong = de::from_raw(json!({ "singerName": 42 }));
        assert_eq!(artist_names(&item), "");
    }

    #[test]
    fn test_toplists_are_flattened() {
        let raw = json!({
            "toplist": { "data": { "group": [
                { "groupName": "巅峰榜", "toplist": [
                    { "topId": 62, "title": "飙升榜", "headPicUrl": "https://y.gtimg.cn/h.jpg", "updateType": 1 },
                    { "topId": 26, "title": "热歌榜", "frontPicUrl": "https://y.gtimg.cn/f.jpg", "updateType": 2 }
                ] },
                { "groupName": "地区榜", "toplist": [
                    { "topId": 3, "title": "欧美榜" }
                ] }
            ] } }
        });
        let entries = toplists(raw);
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0],
            ToplistEntry {
                id: "62".into(),
                name: "飙升榜".into(),
                pic: "https://y.gtimg.cn/h.jpg".into(),
                update_frequency: "Daily".into(),
            }
        );
        assert_eq!(entries[1].pic, "https://y.gtimg.cn/f.jpg");
        assert_eq!(entries[1].update_frequency, "Weekly");
        assert_eq!(entries[2].pic, "");
        assert_eq!(entries[2].update_frequency, "Weekly");
    }

    #[test]
    fn test_toplist() {
        let raw = json!({
            "toplist": { "data": { "songInfoList": [
                { "mid": "001", "title": "稻香", "albumName": "魔杰座", "singer": [{ "name": "周杰伦" }] },
                { "mid": "002", "title": "夜曲", "album": { "name": "十一月的萧邦" }, "singerName": "周杰伦" }
            ] } }
        });
        let songs = toplist(raw);
        assert_eq!(songs[0].name, "稻香");
        assert_eq!(songs[0].album, "魔杰座");
        assert_eq!(songs[1].album, "十一月的萧邦");
        assert_eq!(songs[1].artist, "周杰伦");
    }

    #[test]
    fn test_playlist() {
        let raw = json!({
            "code": 0,
            "cdlist": [{
                "dissname": "周末午后",
                "logo": "https://qpic.y.qq.com/logo.jpg",
                "desc": "第一行<br>第二行",
                "nickname": "QQ音乐",
                "visitnum": 998,
                "songlist": [{ "mid": "003", "title": "告白气球", "album": { "name": "周杰伦的床边故事" }, "singer": [{ "name": "周杰伦" }] }]
            }]
        });
        let playlist = playlist(raw).expect("歌单应存在");
        assert_eq!(playlist.info.desc, "第一行\n第二行");
        assert_eq!(playlist.info.play_count, 998);
        assert_eq!(playlist.info.author, "QQ音乐");
        assert_eq!(playlist.list[0].id, "003");
        assert_eq!(playlist.list[0].artist, "周杰伦");
    }

    #[test]
    fn test_playlist_not_found() {
        assert!(playlist(json!({ "code": 0, "cdlist": [] })).is_none());
        assert!(playlist(json!({ "code": 4000 })).is_none());
    }
}
