//! # CLI Module
//!
//! User-facing commands. Each one loads what it needs from the shared
//! [`crate::config::Config`], drives the library, prints progress with the
//! crate's console macros and exits non-zero on a fatal failure.
//!
//! - [`sync`] - import from Spotify, then export to YouTube (default command)
//! - [`import`] - Spotify → FalkorDB only
//! - [`export`] - FalkorDB → YouTube only
//! - [`auth`] - YouTube login
//! - [`status`] - node counts in the graph
//!
//! ```bash
//! spotgraph auth
//! spotgraph https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M --name "Road Trip"
//! spotgraph import --scrape 37i9dQZF1DXcBWIGoYBM5M
//! spotgraph export --name "Road Trip"
//! ```

mod auth;
mod export;
mod import;
mod status;
mod sync;

pub use auth::auth;
pub use export::{ExportOptions, export};
pub use import::{ImportOptions, import};
pub use status::status;
pub use sync::{SyncOptions, sync};
