//! # API Module
//!
//! Endpoints of the short-lived local server started by `spotgraph auth`:
//!
//! - [`callback`] - receives Google's authorization code and exchanges it,
//!   together with the PKCE verifier, for a YouTube token
//! - [`health`] - reports status and version
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotgraph::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
