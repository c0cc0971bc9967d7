//! Configuration management for spotgraph.
//!
//! Values come from environment variables, which may be seeded from `.env`
//! files. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`<data dir>/spotgraph/.env`)
//! 4. Defaults below
//!
//! [`Config::from_env`] is called once in `main` and the resulting struct is
//! passed by reference to every component that needs credentials.

use std::{env, path::PathBuf, time::Duration};

use crate::warning;

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_WEB_URL: &str = "https://open.spotify.com";
pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_GRAPH_NAME: &str = "SpotifyGraph";
pub const DEFAULT_RATE_LIMIT_MS: u64 = 1500;

/// Loads environment variables from `.env` files.
///
/// The working directory `.env` is read first, then the one in the platform
/// local data directory:
/// - Linux: `~/.local/share/spotgraph/.env`
/// - macOS: `~/Library/Application Support/spotgraph/.env`
/// - Windows: `%LOCALAPPDATA%/spotgraph/.env`
///
/// Variables already present in the environment are never overwritten.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the data
/// directory `.env` exists but cannot be parsed. A missing file is not an
/// error.
pub async fn load_env() -> Result<(), String> {
    let _ = dotenv::dotenv();

    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Directory holding the `.env` file and the cached YouTube token.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotgraph");
    path
}

/// Spotify Web API credentials and endpoints.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    /// `SPOTIFY_CLIENT_ID`; only needed for the Web API source
    pub client_id: Option<String>,
    /// `SPOTIFY_CLIENT_SECRET`
    pub client_secret: Option<String>,
    pub api_url: String,
    pub token_url: String,
    /// Base URL of the public web player, read by the scraper
    pub web_url: String,
}

/// FalkorDB connection settings.
///
/// Also acts as the [`crate::graph::StoreFactory`] of the application:
/// every phase opens its own connection from it.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Name of the graph key, `FALKORDB_GRAPH`
    pub graph: String,
}

impl StoreConfig {
    /// Builds the `redis://` connection URL, percent-encoding credentials.
    pub fn connection_url(&self) -> String {
        let auth = match (&self.username, &self.password) {
            (Some(user), Some(pass)) => format!(
                "{}:{}@",
                urlencoding::encode(user),
                urlencoding::encode(pass)
            ),
            (None, Some(pass)) => format!(":{}@", urlencoding::encode(pass)),
            (Some(user), None) => format!("{}@", urlencoding::encode(user)),
            (None, None) => String::new(),
        };
        format!("redis://{auth}{}:{}", self.host, self.port)
    }
}

/// YouTube Data API and OAuth login settings.
#[derive(Debug, Clone)]
pub struct YoutubeConfig {
    /// Google OAuth client downloaded from the Cloud console
    pub client_secret_file: PathBuf,
    pub api_url: String,
    /// `host:port` of the local OAuth callback server
    pub server_address: String,
    /// Pause between two consecutive songs of an export
    pub rate_limit: Duration,
}

impl YoutubeConfig {
    /// Redirect URI registered with Google; served by the local callback server.
    pub fn redirect_uri(&self) -> String {
        format!("http://{}/callback", self.server_address)
    }
}

/// Runtime configuration for all three external systems.
#[derive(Debug, Clone)]
pub struct Config {
    pub spotify: SpotifyConfig,
    pub store: StoreConfig,
    pub youtube: YoutubeConfig,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Missing Spotify credentials and a missing store password only warn;
    /// they surface as authentication failures once actually used.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET` | none |
    /// | `SPOTIFY_API_URL` | `https://api.spotify.com/v1` |
    /// | `SPOTIFY_TOKEN_URL` | `https://accounts.spotify.com/api/token` |
    /// | `SPOTIFY_WEB_URL` | `https://open.spotify.com` |
    /// | `FALKORDB_HOST` | `localhost` |
    /// | `FALKORDB_PORT` | `6379` |
    /// | `FALKORDB_USERNAME` / `FALKORDB_PASSWORD` | none |
    /// | `FALKORDB_GRAPH` | `SpotifyGraph` |
    /// | `YOUTUBE_CLIENT_SECRET_FILE` | `client_secret.json` |
    /// | `YOUTUBE_API_URL` | `https://www.googleapis.com/youtube/v3` |
    /// | `SERVER_ADDRESS` | `127.0.0.1:8080` |
    /// | `YOUTUBE_RATE_LIMIT_MS` | `1500` |
    pub fn from_env() -> Self {
        let config = Self {
            spotify: SpotifyConfig {
                client_id: optional("SPOTIFY_CLIENT_ID"),
                client_secret: optional("SPOTIFY_CLIENT_SECRET"),
                api_url: or_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
                token_url: or_default("SPOTIFY_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
                web_url: or_default("SPOTIFY_WEB_URL", DEFAULT_SPOTIFY_WEB_URL),
            },
            store: StoreConfig {
                host: or_default("FALKORDB_HOST", "localhost"),
                port: parsed_or("FALKORDB_PORT", 6379),
                username: optional("FALKORDB_USERNAME"),
                password: optional("FALKORDB_PASSWORD"),
                graph: or_default("FALKORDB_GRAPH", DEFAULT_GRAPH_NAME),
            },
            youtube: YoutubeConfig {
                client_secret_file: PathBuf::from(or_default(
                    "YOUTUBE_CLIENT_SECRET_FILE",
                    "client_secret.json",
                )),
                api_url: or_default("YOUTUBE_API_URL", DEFAULT_YOUTUBE_API_URL),
                server_address: or_default("SERVER_ADDRESS", "127.0.0.1:8080"),
                rate_limit: Duration::from_millis(parsed_or(
                    "YOUTUBE_RATE_LIMIT_MS",
                    DEFAULT_RATE_LIMIT_MS,
                )),
            },
        };

        if config.spotify.client_id.is_none() || config.spotify.client_secret.is_none() {
            warning!("Spotify API keys are missing in .env");
        }
        if config.store.password.is_none() {
            warning!("FalkorDB password missing in .env");
        }

        config
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn or_default(key: &str, default: &str) -> String {
    optional(key).unwrap_or_else(|| default.to_string())
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match optional(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warning!("Ignoring invalid value for {}: {}", key, raw);
            default
        }),
        None => default,
    }
}
