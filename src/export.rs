//! Rate limited export of song descriptors to a remote playlist.
//!
//! Songs are handled strictly one after another with a fixed pause between
//! consecutive songs. A song without a match is skipped, a transient error is
//! logged, and a quota error stops the loop: everything from that song on is
//! reported as unprocessed.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::{
    error::{Error, Result},
    info, success, warning,
};

/// Capabilities the export needs from the remote side.
#[async_trait]
pub trait SongSink: Send {
    async fn create_playlist(&mut self, name: &str) -> Result<String>;
    async fn search_song(&mut self, query: &str) -> Result<Option<String>>;
    async fn insert_item(&mut self, playlist_id: &str, video_id: &str) -> Result<()>;
}

/// Outcome of one export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub added: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<(String, String)>,
    pub unprocessed: Vec<String>,
    pub quota_exceeded: bool,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        !self.quota_exceeded && self.unprocessed.is_empty()
    }
}

async fn add_song<S: SongSink + ?Sized>(sink: &mut S, playlist_id: &str, song: &str) -> Result<()> {
    let video_id = sink
        .search_song(song)
        .await?
        .ok_or_else(|| Error::NoMatch(song.to_string()))?;
    sink.insert_item(playlist_id, &video_id).await
}

/// Searches and appends every song, pausing `interval` between songs.
pub async fn export_songs<S: SongSink + ?Sized>(
    sink: &mut S,
    playlist_id: &str,
    songs: &[String],
    interval: Duration,
) -> ExportReport {
    let mut report = ExportReport::default();
    info!("Adding {} songs to YouTube...", songs.len());

    for (index, song) in songs.iter().enumerate() {
        if index > 0 {
            sleep(interval).await;
        }

        match add_song(sink, playlist_id, song).await {
            Ok(()) => {
                success!("Added: {}", song);
                report.added.push(song.clone());
            }
            Err(Error::NoMatch(_)) => {
                warning!("Not found: {}", song);
                report.skipped.push(song.clone());
            }
            Err(e) if e.is_quota_exceeded() => {
                warning!("QUOTA EXCEEDED! Come back tomorrow.");
                report.quota_exceeded = true;
                report.unprocessed = songs[index..].to_vec();
                break;
            }
            Err(e) => {
                warning!("Error for {}: {}", song, e);
                report.failed.push((song.clone(), e.to_string()));
            }
        }
    }

    report
}

/// Creates the target playlist and exports into it.
///
/// # Errors
///
/// Only playlist creation can fail the call; per-song problems end up in
/// the report.
pub async fn create_and_export<S: SongSink + ?Sized>(
    sink: &mut S,
    name: &str,
    songs: &[String],
    interval: Duration,
) -> Result<(String, ExportReport)> {
    info!("Creating playlist: '{}'...", name);
    let playlist_id = sink.create_playlist(name).await?;
    let report = export_songs(sink, &playlist_id, songs, interval).await;
    Ok((playlist_id, report))
}
