//! Entity construction from raw source records.
//!
//! Both the Web API and the scraper produce [`RawPlaylist`] values; this is
//! the one place where they become a validated [`Playlist`] tree.

use crate::{
    entities::{Album, Artist, Playlist, Track, UNKNOWN_ALBUM},
    error::{Error, Result},
    types::{RawAlbum, RawArtist, RawPlaylist, RawTrack},
};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_PLAYLIST: &str = "Unknown Playlist";

/// Placeholder id for a performer known only by name.
pub fn synthesize_artist_id(name: &str) -> String {
    format!("artist_{}", name.trim())
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn build_album(raw: Option<&RawAlbum>) -> Album {
    let Some(raw) = raw else {
        return Album::unknown(None);
    };
    let image_url = raw.images.first().map(|img| img.url.clone());
    let name = non_blank(raw.name.as_ref()).unwrap_or(UNKNOWN_ALBUM);

    match non_blank(raw.id.as_ref()) {
        Some(id) => Album::new(id, name, raw.release_date.clone(), image_url)
            .unwrap_or_else(|_| Album::unknown(None)),
        None => Album::unknown(image_url),
    }
}

fn build_artist(raw: &RawArtist) -> Option<Artist> {
    let name = non_blank(raw.name.as_ref());
    let id = match (non_blank(raw.id.as_ref()), name) {
        (Some(id), _) => id.to_string(),
        (None, Some(name)) => synthesize_artist_id(name),
        (None, None) => return None,
    };
    Artist::new(id, name.unwrap_or("Unknown")).ok()
}

/// Converts one raw track; `None` when the record has no id.
///
/// A track without usable artist data gets exactly one
/// [`Artist::unknown`] performer.
pub fn build_track(raw: &RawTrack) -> Option<Track> {
    let id = non_blank(raw.id.as_ref())?;

    let mut artists: Vec<Artist> = raw.artists.iter().filter_map(build_artist).collect();
    if artists.is_empty() {
        artists.push(Artist::unknown());
    }

    let popularity = raw.popularity.unwrap_or(0).min(100) as u8;

    Track::new(
        id,
        non_blank(raw.name.as_ref()).unwrap_or(UNKNOWN_TITLE),
        raw.duration_ms.unwrap_or(0),
        popularity,
        build_album(raw.album.as_ref()),
        artists,
    )
    .ok()
}

/// Builds the playlist tree from a raw playlist.
///
/// `requested_id` is used when the record carries no id of its own.
/// Tracks without an id are skipped.
///
/// # Errors
///
/// [`Error::EmptyResult`] when no track survives extraction.
pub fn build_playlist(raw: &RawPlaylist, requested_id: &str) -> Result<Playlist> {
    let tracks: Vec<Track> = raw
        .tracks
        .items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .filter_map(build_track)
        .collect();

    if tracks.is_empty() {
        return Err(Error::EmptyResult(
            "playlist found, but no tracks could be extracted".to_string(),
        ));
    }

    let id = non_blank(raw.id.as_ref()).unwrap_or(requested_id);
    let name = non_blank(raw.name.as_ref()).unwrap_or(UNKNOWN_PLAYLIST);

    Playlist::new(id, name, raw.description.clone(), tracks)
}
