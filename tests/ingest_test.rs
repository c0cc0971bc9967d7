use serde_json::json;
use spotgraph::{
    Error,
    entities::{UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_ID},
    ingest::{UNKNOWN_PLAYLIST, build_playlist, build_track},
    types::{RawPlaylist, RawTrack},
};

fn raw_track(value: serde_json::Value) -> RawTrack {
    serde_json::from_value(value).unwrap()
}

fn raw_playlist(value: serde_json::Value) -> RawPlaylist {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_full_track_is_converted() {
    let track = build_track(&raw_track(json!({
        "id": "t1",
        "name": "Song",
        "duration_ms": 215000,
        "popularity": 64,
        "album": {
            "id": "al1",
            "name": "Record",
            "release_date": "2020-01-31",
            "images": [{"url": "https://i.scdn.co/image/big"}, {"url": "https://i.scdn.co/image/small"}]
        },
        "artists": [{"id": "a1", "name": "A"}, {"id": "a2", "name": "B"}]
    })))
    .unwrap();

    assert_eq!(track.id(), "t1");
    assert_eq!(track.title(), "Song");
    assert_eq!(track.duration_ms(), 215000);
    assert_eq!(track.popularity(), 64);
    assert_eq!(track.album().id(), "al1");
    assert_eq!(track.album().release_date(), Some("2020-01-31"));
    assert_eq!(track.album().image_url(), Some("https://i.scdn.co/image/big"));
    assert_eq!(track.artist_names(), "A, B");
}

#[test]
fn test_track_without_id_is_skipped() {
    assert!(build_track(&raw_track(json!({"name": "Local file"}))).is_none());
    assert!(build_track(&raw_track(json!({"id": "   ", "name": "Blank"}))).is_none());
}

#[test]
fn test_track_without_artists_gets_sentinel() {
    let track = build_track(&raw_track(json!({"id": "t1", "name": "Song", "artists": []}))).unwrap();
    assert_eq!(track.artists().len(), 1);
    assert_eq!(track.artists()[0].id(), UNKNOWN_ID);
    assert_eq!(track.artists()[0].name(), UNKNOWN_ARTIST);
}

#[test]
fn test_track_without_album_id_keeps_artwork() {
    let track = build_track(&raw_track(json!({
        "id": "t1",
        "name": "Song",
        "album": {"name": "Whatever", "images": [{"url": "https://img"}]},
        "artists": [{"id": "a1", "name": "A"}]
    })))
    .unwrap();
    assert_eq!(track.album().id(), UNKNOWN_ID);
    assert_eq!(track.album().name(), UNKNOWN_ALBUM);
    assert_eq!(track.album().image_url(), Some("https://img"));
}

#[test]
fn test_artist_known_only_by_name_gets_synthesized_id() {
    let track = build_track(&raw_track(json!({
        "id": "t1",
        "artists": [{"name": "Scraped Artist"}]
    })))
    .unwrap();
    assert_eq!(track.artists()[0].id(), "artist_Scraped Artist");
}

#[test]
fn test_popularity_is_clamped() {
    let track = build_track(&raw_track(json!({"id": "t1", "popularity": 250}))).unwrap();
    assert_eq!(track.popularity(), 100);
}

#[test]
fn test_playlist_keeps_source_order_and_drops_idless_tracks() {
    let playlist = build_playlist(
        &raw_playlist(json!({
            "name": "Mix",
            "tracks": {"items": [
                {"track": {"id": "t2", "name": "Second", "artists": [{"id": "a", "name": "A"}]}},
                {"track": null},
                {"track": {"name": "No id"}},
                {"track": {"id": "t1", "name": "First", "artists": [{"id": "a", "name": "A"}]}}
            ]}
        })),
        "requested",
    )
    .unwrap();

    assert_eq!(playlist.id(), "requested");
    assert_eq!(playlist.name(), "Mix");
    let ids: Vec<&str> = playlist.tracks().iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec!["t2", "t1"]);
}

#[test]
fn test_playlist_without_name_uses_placeholder() {
    let playlist = build_playlist(
        &raw_playlist(json!({"id": "p1", "tracks": {"items": [{"track": {"id": "t1"}}]}})),
        "requested",
    )
    .unwrap();
    assert_eq!(playlist.id(), "p1");
    assert_eq!(playlist.name(), UNKNOWN_PLAYLIST);
}

#[test]
fn test_playlist_without_usable_tracks_is_empty_result() {
    let err = build_playlist(
        &raw_playlist(json!({"id": "p1", "tracks": {"items": [{"track": {"name": "x"}}]}})),
        "p1",
    )
    .unwrap_err();
    assert!(matches!(err, Error::EmptyResult(_)));
}
