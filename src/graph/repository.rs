use std::collections::{HashMap, HashSet};

use serde_json::{Value, json};

use super::{GraphStore, QueryResult};
use crate::{entities::Playlist, error::Result, utils};

/// Statements issued by [`PlaylistRepository`].
pub mod statements {
    pub const CLEAR: &str = "MATCH (n) DETACH DELETE n";

    pub const UPSERT_PLAYLIST: &str = "MERGE (p:Playlist {id: $id}) \
         SET p.name = $name, p.description = $description";

    pub const UPSERT_ALBUMS: &str = "UNWIND $albums AS row \
         MERGE (a:Album {id: row.id}) \
         SET a.name = row.name, a.release_date = row.release_date, a.image = row.image";

    pub const UPSERT_ARTISTS: &str = "UNWIND $artists AS row \
         MERGE (a:Artist {id: row.id}) \
         SET a.name = row.name";

    pub const UPSERT_TRACKS: &str = "UNWIND $tracks AS row \
         MERGE (t:Track {id: row.id}) \
         SET t.title = row.title, t.duration = row.duration, t.popularity = row.popularity \
         WITH t, row \
         MATCH (a:Album {id: row.album_id}) \
         MERGE (t)-[:BELONGS_TO]->(a)";

    pub const LINK_ARTISTS: &str = "UNWIND $links AS row \
         MATCH (t:Track {id: row.track_id}), (a:Artist {id: row.artist_id}) \
         MERGE (t)-[r:PERFORMED_BY]->(a) \
         SET r.position = row.position";

    pub const LINK_PLAYLIST: &str = "MATCH (p:Playlist {id: $playlist_id}) \
         UNWIND $entries AS row \
         MATCH (t:Track {id: row.id}) \
         MERGE (p)-[c:CONTAINS]->(t) \
         SET c.position = row.position";

    pub const SONGS_IN_PLAYLIST: &str =
        "MATCH (p:Playlist {id: $playlist_id})-[c:CONTAINS]->(t:Track)-[r:PERFORMED_BY]->(a:Artist) \
         RETURN t.id, t.title, a.id, a.name \
         ORDER BY c.position, r.position";

    /// Every performed track; tracks outside any playlist sort last.
    pub const ALL_SONGS: &str = "MATCH (t:Track)-[r:PERFORMED_BY]->(a:Artist) \
         OPTIONAL MATCH (p:Playlist)-[c:CONTAINS]->(t) \
         RETURN t.id, t.title, a.id, a.name \
         ORDER BY p.id, c.position, t.id, r.position";

    pub const COUNT_NODES: &str = "MATCH (n) \
         RETURN labels(n)[0] AS label, count(n) AS count \
         ORDER BY label";
}

/// Rows for the batched writes of one playlist.
///
/// A track id that occurs more than once yields a single track row built
/// from its last occurrence, so the track keeps exactly one album and the
/// artists of that occurrence. Albums and artists are deduplicated by id
/// with the first occurrence among the kept tracks winning. Every
/// occurrence still gets a playlist entry; the last position written wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistBatch {
    pub albums: Vec<Value>,
    pub artists: Vec<Value>,
    pub tracks: Vec<Value>,
    pub artist_links: Vec<Value>,
    pub entries: Vec<Value>,
}

impl PlaylistBatch {
    pub fn from_playlist(playlist: &Playlist) -> Self {
        let tracks = playlist.tracks();
        let last_seen: HashMap<&str, usize> = tracks
            .iter()
            .enumerate()
            .map(|(index, track)| (track.id(), index))
            .collect();

        let mut batch = Self::default();
        let mut seen_albums = HashSet::new();
        let mut seen_artists = HashSet::new();

        for (position, track) in tracks.iter().enumerate() {
            batch.entries.push(json!({
                "id": track.id(),
                "position": position,
            }));
            if last_seen.get(track.id()) != Some(&position) {
                continue;
            }

            let album = track.album();
            if seen_albums.insert(album.id()) {
                batch.albums.push(json!({
                    "id": album.id(),
                    "name": album.name(),
                    "release_date": album.release_date().unwrap_or_default(),
                    "image": album.image_url().unwrap_or_default(),
                }));
            }

            for (artist_position, artist) in track.artists().iter().enumerate() {
                if seen_artists.insert(artist.id()) {
                    batch.artists.push(json!({
                        "id": artist.id(),
                        "name": artist.name(),
                    }));
                }
                batch.artist_links.push(json!({
                    "track_id": track.id(),
                    "artist_id": artist.id(),
                    "position": artist_position,
                }));
            }

            batch.tracks.push(json!({
                "id": track.id(),
                "title": track.title(),
                "duration": track.duration_ms(),
                "popularity": track.popularity(),
                "album_id": album.id(),
            }));
        }

        batch
    }
}

/// Playlist persistence on top of any [`GraphStore`].
pub struct PlaylistRepository<S> {
    store: S,
}

impl<S: GraphStore> PlaylistRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Deletes every node and relationship in the graph.
    pub async fn clear(&mut self) -> Result<()> {
        self.store.query(statements::CLEAR, &Value::Null).await?;
        Ok(())
    }

    /// Upserts the playlist tree with at most six statements.
    ///
    /// The order matters: tracks are linked to albums that must already
    /// exist, and relationships need both ends. A failure part-way leaves
    /// whatever earlier steps wrote.
    pub async fn save_playlist(&mut self, playlist: &Playlist) -> Result<()> {
        self.store
            .query(
                statements::UPSERT_PLAYLIST,
                &json!({
                    "id": playlist.id(),
                    "name": playlist.name(),
                    "description": playlist.description().unwrap_or_default(),
                }),
            )
            .await?;

        let batch = PlaylistBatch::from_playlist(playlist);

        if !batch.albums.is_empty() {
            self.store
                .query(statements::UPSERT_ALBUMS, &json!({ "albums": batch.albums }))
                .await?;
        }

        if !batch.artists.is_empty() {
            self.store
                .query(statements::UPSERT_ARTISTS, &json!({ "artists": batch.artists }))
                .await?;
        }

        if !batch.tracks.is_empty() {
            self.store
                .query(statements::UPSERT_TRACKS, &json!({ "tracks": batch.tracks }))
                .await?;
        }

        if !batch.artist_links.is_empty() {
            self.store
                .query(statements::LINK_ARTISTS, &json!({ "links": batch.artist_links }))
                .await?;
        }

        if !batch.entries.is_empty() {
            self.store
                .query(
                    statements::LINK_PLAYLIST,
                    &json!({ "playlist_id": playlist.id(), "entries": batch.entries }),
                )
                .await?;
        }

        Ok(())
    }

    /// Reads back `"<title> by <artist>, ..."` descriptors.
    ///
    /// With a playlist id only that playlist is read, in track order.
    /// Without one every stored track is read, ordered by playlist id and
    /// then track order; tracks left outside any playlist by an interrupted
    /// save come last. A track shared by several playlists appears once.
    pub async fn song_descriptors(&mut self, playlist_id: Option<&str>) -> Result<Vec<String>> {
        let result = match playlist_id {
            Some(id) => {
                self.store
                    .query(statements::SONGS_IN_PLAYLIST, &json!({ "playlist_id": id }))
                    .await?
            }
            None => self.store.query(statements::ALL_SONGS, &Value::Null).await?,
        };
        Ok(group_songs(&result))
    }

    /// Node count per label, sorted by label.
    pub async fn count_nodes(&mut self) -> Result<Vec<(String, i64)>> {
        let result = self.store.query(statements::COUNT_NODES, &Value::Null).await?;
        Ok(result
            .rows
            .iter()
            .filter_map(|row| match row.as_slice() {
                [label, count, ..] => Some((label.to_text(), count.as_i64().unwrap_or(0))),
                _ => None,
            })
            .collect())
    }
}

/// Groups `(track id, title, artist id, artist name)` rows into
/// descriptors, keeping the first-seen order of tracks and of artists within
/// a track. Artists are told apart by id, so two performers sharing a name
/// are both listed.
pub fn group_songs(result: &QueryResult) -> Vec<String> {
    let mut order: Vec<(String, Vec<(String, String)>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in &result.rows {
        let [track_id, title, artist_id, artist_name, ..] = row.as_slice() else {
            continue;
        };
        let slot = *index.entry(track_id.to_text()).or_insert_with(|| {
            order.push((title.to_text(), Vec::new()));
            order.len() - 1
        });
        let artist_id = artist_id.to_text();
        let artists = &mut order[slot].1;
        if !artists.iter().any(|(id, _)| *id == artist_id) {
            artists.push((artist_id, artist_name.to_text()));
        }
    }

    order
        .into_iter()
        .map(|(title, artists)| {
            let names: Vec<String> = artists.into_iter().map(|(_, name)| name).collect();
            utils::song_descriptor(&title, &names)
        })
        .collect()
}
