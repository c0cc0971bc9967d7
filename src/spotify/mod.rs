//! # Spotify Source Module
//!
//! Two ways of reading a playlist, both producing the same raw records
//! ([`RawPlaylist`]) that [`crate::ingest`] turns into entities:
//!
//! - [`SpotifyApi`] - Web API with the client-credentials grant. Reads every
//!   page of `GET /playlists/{id}` by following `tracks.next`.
//! - [`SpotifyScraper`] - best-effort extraction from the public playlist
//!   page. No credentials needed, but only what the page renders is
//!   available: no album, duration or popularity, and artist ids are
//!   synthesized from names.
//!
//! ## Error Mapping
//!
//! - `401` / rejected client credentials - [`crate::Error::AuthFailure`]
//! - `400` / `403` / `404` - [`crate::Error::NotFound`]
//! - anything else unsuccessful - [`crate::Error::Http`]

mod auth;
mod playlist;
mod scrape;

use async_trait::async_trait;

use crate::{error::Result, types::RawPlaylist};

pub use auth::request_app_token;
pub use playlist::SpotifyApi;
pub use scrape::{SpotifyScraper, parse_playlist_page};

/// Capability: fetch a playlist by id.
///
/// Implementations return the playlist as raw records with every item in
/// source order; validation and sentinel handling happen later in
/// [`crate::ingest::build_playlist`].
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Fetches the playlist with the given bare id.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Spotify playlist id, already extracted from a URL or
    ///   URI with [`crate::utils::extract_playlist_id`]
    ///
    /// # Errors
    ///
    /// [`crate::Error::AuthFailure`] or [`crate::Error::NotFound`] depending
    /// on the source; transport failures as [`crate::Error::Http`].
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<RawPlaylist>;
}
