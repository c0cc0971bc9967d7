use crate::{
    config::Config,
    error,
    error::Result,
    export::{ExportReport, create_and_export},
    info, pipeline, success, utils, warning,
    youtube::{self, YoutubeClient},
};

const DEFAULT_PLAYLIST_NAME: &str = "Imported from FalkorDB";

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub name: Option<String>,
    /// Restrict the export to one stored playlist.
    pub playlist_id: Option<String>,
    /// Accept the proposed name without asking.
    pub yes: bool,
}

/// Picks the YouTube playlist name, asking the user when nothing was passed.
pub(crate) fn resolve_playlist_name(name: Option<&str>, proposed: &str, yes: bool) -> Result<String> {
    if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
        return Ok(name.trim().to_string());
    }
    if yes || utils::confirm(&format!("Use name '{proposed}' for YouTube?"))? {
        return Ok(proposed.to_string());
    }

    let entered = utils::prompt("Enter new name: ")?;
    if entered.is_empty() {
        Ok(proposed.to_string())
    } else {
        Ok(entered)
    }
}

/// FalkorDB → YouTube. Shared by `export` and `sync`.
pub(crate) async fn run_export(
    config: &Config,
    sink: &mut YoutubeClient,
    name: &str,
    songs: &[String],
) -> Result<(String, ExportReport)> {
    create_and_export(sink, name, songs, config.youtube.rate_limit).await
}

pub(crate) fn print_report(playlist_id: &str, report: &ExportReport) {
    info!(
        "Playlist https://www.youtube.com/playlist?list={}",
        playlist_id
    );
    success!("{} songs added.", report.added.len());
    if !report.skipped.is_empty() {
        warning!("{} songs without a match.", report.skipped.len());
    }
    if !report.failed.is_empty() {
        warning!("{} songs failed.", report.failed.len());
    }
    if report.quota_exceeded {
        warning!(
            "{} songs left unprocessed, first one: {}",
            report.unprocessed.len(),
            report.unprocessed.first().map(String::as_str).unwrap_or("-")
        );
    }
}

pub async fn export(config: &Config, opts: ExportOptions) {
    info!("Reading from FalkorDB...");
    let songs = match pipeline::fetch_songs(&config.store, opts.playlist_id.as_deref()).await {
        Ok(songs) => songs,
        Err(e) => error!("{}", e),
    };

    let name = match resolve_playlist_name(opts.name.as_deref(), DEFAULT_PLAYLIST_NAME, opts.yes) {
        Ok(name) => name,
        Err(e) => error!("{}", e),
    };

    let mut sink = match youtube::authenticated_client(&config.youtube).await {
        Ok(sink) => sink,
        Err(e) => error!("YouTube login failed: {}", e),
    };

    match run_export(config, &mut sink, &name, &songs).await {
        Ok((playlist_id, report)) => print_report(&playlist_id, &report),
        Err(e) => error!("YouTube export failed: {}", e),
    }
}
