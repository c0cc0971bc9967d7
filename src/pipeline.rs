//! Ingestion and read-back orchestration.
//!
//! Source, store and sink are passed in as trait objects or generics so the
//! whole flow runs against fakes in tests. Every phase opens its own store
//! connection through a [`StoreFactory`].

use crate::{
    entities::Playlist,
    error::{Error, Result},
    graph::{PlaylistRepository, StoreFactory},
    info,
    ingest::build_playlist,
    spotify::PlaylistSource,
    success, warning,
};

#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Wipe the graph before saving (full resync).
    pub clear: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { clear: true }
    }
}

/// Deletes the whole graph through a fresh connection.
pub async fn clear_store<F: StoreFactory + ?Sized>(stores: &F) -> Result<()> {
    let mut repo = PlaylistRepository::new(stores.open().await?);
    repo.clear().await
}

/// Fetches, builds and persists one playlist.
///
/// A store that cannot be cleared only produces a warning. Fetch errors,
/// an empty track list and save errors are returned; a failed save may
/// leave a partial graph behind.
pub async fn ingest_playlist<P, F>(
    source: &P,
    stores: &F,
    playlist_id: &str,
    options: IngestOptions,
) -> Result<Playlist>
where
    P: PlaylistSource + ?Sized,
    F: StoreFactory + ?Sized,
{
    if options.clear {
        info!("Clearing entire database...");
        if let Err(e) = clear_store(stores).await {
            warning!("Could not clear database (is it running?): {}", e);
        }
    }

    info!("Looking up Playlist ID: {}...", playlist_id);
    let raw = source.fetch_playlist(playlist_id).await?;
    let playlist = build_playlist(&raw, playlist_id)?;
    success!(
        "Found: '{}' ({} tracks)",
        playlist.name(),
        playlist.tracks().len()
    );

    info!("Saving {} tracks to Database...", playlist.tracks().len());
    let mut repo = PlaylistRepository::new(stores.open().await?);
    repo.save_playlist(&playlist).await?;
    success!("Data saved to FalkorDB.");

    Ok(playlist)
}

/// Reads the song descriptors to export.
///
/// # Errors
///
/// [`Error::EmptyResult`] when the store holds no performed tracks.
pub async fn fetch_songs<F: StoreFactory + ?Sized>(
    stores: &F,
    playlist_id: Option<&str>,
) -> Result<Vec<String>> {
    let mut repo = PlaylistRepository::new(stores.open().await?);
    let songs = repo.song_descriptors(playlist_id).await?;
    if songs.is_empty() {
        return Err(Error::EmptyResult(
            "database is empty, run spotgraph import first".to_string(),
        ));
    }
    success!("Found {} songs to transfer.", songs.len());
    Ok(songs)
}
