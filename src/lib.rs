//! Spotify to YouTube playlist bridge
//!
//! This library reads a Spotify playlist (through the Web API or by scraping the
//! public playlist page), stores the resulting track/album/artist graph in
//! FalkorDB and rebuilds the playlist on YouTube by searching every track.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command implementations wired to the binary
//! - `config` - Configuration loaded once from the environment
//! - `entities` - Playlist, Track, Album and Artist value types
//! - `error` - Error taxonomy shared by every phase
//! - `export` - Rate limited export loop driving a [`export::SongSink`]
//! - `graph` - Graph store access and batched playlist persistence
//! - `ingest` - Entity construction from raw source records
//! - `management` - Persisted OAuth token handling
//! - `pipeline` - Ingestion and read-back orchestration
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Playlist sources (Web API and HTML scrape)
//! - `types` - Wire types for the Spotify and YouTube APIs
//! - `utils` - Small helpers (ids, PKCE, prompts, descriptors)
//! - `youtube` - YouTube Data API client and login flow
//!
//! # Example
//!
//! ```
//! use spotgraph::{config::Config, graph::{FalkorStore, PlaylistRepository}};
//!
//! #[tokio::main]
//! async fn main() -> spotgraph::Result<()> {
//!     let config = Config::from_env();
//!     let store = FalkorStore::connect(&config.store).await?;
//!     let songs = PlaylistRepository::new(store).song_descriptors(None).await?;
//!     println!("{} songs", songs.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod entities;
pub mod error;
pub mod export;
pub mod graph;
pub mod ingest;
pub mod management;
pub mod pipeline;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod youtube;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Connecting to FalkorDB at {}...", host);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Saved {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the command layer uses this macro. Library code returns
/// [`Error`] values and lets the caller decide whether a failure is fatal.
///
/// # Example
///
/// ```
/// error!("Database Error: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a store that could not be cleared or
/// a song without any YouTube match.
///
/// # Example
///
/// ```
/// warning!("Could not clear database (is it running?): {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
