//! # YouTube Sink Module
//!
//! - [`auth`] - OAuth 2.0 installed-app login with PKCE. A local callback
//!   server receives the authorization code; the token is cached under the
//!   data directory and refreshed automatically by
//!   [`crate::management::TokenManager`].
//! - [`YoutubeClient`] - YouTube Data API v3 calls used by the export loop
//!   (`search.list`, `playlists.insert`, `playlistItems.insert`).
//!
//! `403` and `429` answers are reported as [`crate::Error::QuotaExceeded`];
//! the export loop stops on them.

pub mod auth;
mod client;

pub use auth::{authenticated_client, exchange_code, login, read_client_secret, refresh_token};
pub use client::YoutubeClient;

pub const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube";
pub const PLAYLIST_DESCRIPTION: &str = "From FalkorDB";
