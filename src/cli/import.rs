use tabled::Table;

use crate::{
    config::Config,
    entities::Playlist,
    error,
    error::{Error, Result},
    pipeline::{self, IngestOptions},
    spotify::{PlaylistSource, SpotifyApi, SpotifyScraper},
    types::TrackTableRow,
    utils,
};

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub url: Option<String>,
    pub scrape: bool,
    pub keep: bool,
}

/// Human readable message for an ingestion failure.
pub(crate) fn describe(err: &Error) -> String {
    match err {
        Error::AuthFailure(_) => format!("Auth Failed: {err}"),
        Error::NotFound(_) => format!("Could not find playlist. Is the link correct?\nError: {err}"),
        Error::EmptyResult(_) => "Playlist found, but no tracks could be extracted.".to_string(),
        Error::Store(_) | Error::StoreUnavailable(_) => format!("Database Error: {err}"),
        other => other.to_string(),
    }
}

async fn open_source(config: &Config, scrape: bool) -> Result<Box<dyn PlaylistSource>> {
    if scrape {
        return Ok(Box::new(SpotifyScraper::new(&config.spotify)?));
    }

    let pb = utils::spinner("Authenticating with Spotify...");
    let api = SpotifyApi::authenticate(&config.spotify).await;
    pb.finish_and_clear();
    Ok(Box::new(api?))
}

/// Spotify → FalkorDB. Shared by `import` and `sync`.
pub(crate) async fn ingest(config: &Config, opts: &ImportOptions) -> Result<Playlist> {
    let url = match &opts.url {
        Some(url) => url.clone(),
        None => utils::prompt("Paste the Spotify Playlist URL here: ")?,
    };
    if url.trim().is_empty() {
        return Err(Error::NotFound("no URL provided".to_string()));
    }

    let playlist_id = utils::extract_playlist_id(&url);
    let source = open_source(config, opts.scrape).await?;

    pipeline::ingest_playlist(
        source.as_ref(),
        &config.store,
        &playlist_id,
        IngestOptions { clear: !opts.keep },
    )
    .await
}

pub(crate) fn print_tracks(playlist: &Playlist) {
    let rows: Vec<TrackTableRow> = playlist
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            position: i + 1,
            title: t.title().to_string(),
            artists: t.artist_names(),
            album: t.album().name().to_string(),
            duration: utils::format_duration(t.duration_ms()),
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub async fn import(config: &Config, opts: ImportOptions) {
    match ingest(config, &opts).await {
        Ok(playlist) => print_tracks(&playlist),
        Err(e) => error!("{}", describe(&e)),
    }
}
