use super::{
    ImportOptions,
    export::{print_report, resolve_playlist_name, run_export},
    import::{describe, ingest, print_tracks},
};
use crate::{config::Config, error, info, pipeline, success, youtube};

/// Options of the default command.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub import: ImportOptions,
    pub name: Option<String>,
    pub yes: bool,
}

/// Full bridge: Spotify → FalkorDB → YouTube.
///
/// YouTube credentials are resolved before the graph is touched so a failed
/// login never wipes the stored playlist.
pub async fn sync(config: &Config, opts: SyncOptions) {
    let mut sink = match youtube::authenticated_client(&config.youtube).await {
        Ok(sink) => sink,
        Err(e) => error!("YouTube login failed: {}", e),
    };

    info!("STEP 1: IMPORT FROM SPOTIFY");
    let playlist = match ingest(config, &opts.import).await {
        Ok(playlist) => playlist,
        Err(e) => error!("{}", describe(&e)),
    };
    print_tracks(&playlist);

    info!("STEP 2: EXPORT TO YOUTUBE");
    let songs = match pipeline::fetch_songs(&config.store, Some(playlist.id())).await {
        Ok(songs) => songs,
        Err(_) => error!("No songs found to sync."),
    };

    let name = match resolve_playlist_name(opts.name.as_deref(), playlist.name(), opts.yes) {
        Ok(name) => name,
        Err(e) => error!("{}", e),
    };

    match run_export(config, &mut sink, &name, &songs).await {
        Ok((playlist_id, report)) => {
            print_report(&playlist_id, &report);
            if report.is_complete() {
                success!("MISSION ACCOMPLISHED!");
            }
        }
        Err(e) => error!("YouTube export failed: {}", e),
    }
}
