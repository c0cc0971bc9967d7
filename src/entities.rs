//! Domain entities: Playlist → Tracks → {Album, Artists}.
//!
//! Values are validated when constructed and never mutated afterwards.
//! Identity is the `id` string alone; two values with the same id are the
//! same graph node no matter how their other attributes differ.

use crate::error::{Error, Result};

pub const UNKNOWN_ID: &str = "unknown";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

fn require_id(kind: &str, id: String) -> Result<String> {
    if id.trim().is_empty() {
        return Err(Error::InvalidEntity(format!("{kind} id must not be empty")));
    }
    Ok(id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    id: String,
    name: String,
}

impl Artist {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            id: require_id("artist", id.into())?,
            name: name.into(),
        })
    }

    /// Stand-in attached to tracks whose source lists no performer.
    pub fn unknown() -> Self {
        Self {
            id: UNKNOWN_ID.to_string(),
            name: UNKNOWN_ARTIST.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    id: String,
    name: String,
    release_date: Option<String>,
    image_url: Option<String>,
}

impl Album {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        release_date: Option<String>,
        image_url: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            id: require_id("album", id.into())?,
            name: name.into(),
            release_date,
            image_url,
        })
    }

    /// Stand-in for tracks without album data; keeps the artwork if any.
    pub fn unknown(image_url: Option<String>) -> Self {
        Self {
            id: UNKNOWN_ID.to_string(),
            name: UNKNOWN_ALBUM.to_string(),
            release_date: None,
            image_url,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    id: String,
    title: String,
    duration_ms: u64,
    popularity: u8,
    album: Album,
    artists: Vec<Artist>,
}

impl Track {
    /// Builds a track; needs a non-empty id, popularity in `0..=100` and at
    /// least one artist.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        duration_ms: u64,
        popularity: u8,
        album: Album,
        artists: Vec<Artist>,
    ) -> Result<Self> {
        let id = require_id("track", id.into())?;
        if popularity > 100 {
            return Err(Error::InvalidEntity(format!(
                "track {id} popularity {popularity} is outside 0-100"
            )));
        }
        if artists.is_empty() {
            return Err(Error::InvalidEntity(format!("track {id} has no artist")));
        }
        Ok(Self {
            id,
            title: title.into(),
            duration_ms,
            popularity,
            album,
            artists,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn popularity(&self) -> u8 {
        self.popularity
    }

    pub fn album(&self) -> &Album {
        &self.album
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// Comma separated artist names, in source order.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    id: String,
    name: String,
    description: Option<String>,
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        tracks: Vec<Track>,
    ) -> Result<Self> {
        Ok(Self {
            id: require_id("playlist", id.into())?,
            name: name.into(),
            description,
            tracks,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_ids() {
        assert!(matches!(Artist::new("", "A"), Err(Error::InvalidEntity(_))));
        assert!(matches!(
            Album::new("  ", "B", None, None),
            Err(Error::InvalidEntity(_))
        ));
        assert!(matches!(
            Playlist::new("", "P", None, Vec::new()),
            Err(Error::InvalidEntity(_))
        ));
    }

    #[test]
    fn track_requires_an_artist_and_bounded_popularity() {
        let album = Album::unknown(None);
        assert!(Track::new("t1", "Song", 0, 0, album.clone(), Vec::new()).is_err());
        assert!(Track::new("t1", "Song", 0, 101, album.clone(), vec![Artist::unknown()]).is_err());

        let track = Track::new("t1", "Song", 1000, 100, album, vec![Artist::unknown()]).unwrap();
        assert_eq!(track.artist_names(), UNKNOWN_ARTIST);
    }
}
