use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Selector};

use super::PlaylistSource;
use crate::{
    config::SpotifyConfig,
    error::{Error, Result},
    ingest::{UNKNOWN_PLAYLIST, synthesize_artist_id},
    types::{RawAlbum, RawArtist, RawImage, RawPlaylist, RawPlaylistItem, RawTrack, RawTrackPage},
};

// Desktop user agent; the mobile markup hides most of the track rows.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Playlist source that reads the public web page.
///
/// Used when no Spotify credentials are available (`--scrape`). The page
/// is requested with a desktop user agent and parsed with CSS selectors by
/// [`parse_playlist_page`]. Extraction is best effort: albums, durations
/// and popularity are not rendered on the page, so every track gets the
/// unknown album (with the row artwork) and zero for both numbers.
pub struct SpotifyScraper {
    client: Client,
    web_url: String,
}

impl SpotifyScraper {
    /// Builds the scraper for `config.web_url`.
    ///
    /// # Errors
    ///
    /// [`Error::Http`] when the HTTP client cannot be constructed.
    ///
    /// # Example
    ///
    /// ```
    /// let scraper = SpotifyScraper::new(&config.spotify)?;
    /// let raw = scraper.fetch_playlist("37i9dQZF1DXcBWIGoYBM5M").await?;
    /// ```
    pub fn new(config: &SpotifyConfig) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            web_url: config.web_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PlaylistSource for SpotifyScraper {
    /// Downloads `{web_url}/playlist/{id}` and parses it.
    ///
    /// A `404` becomes [`Error::NotFound`]; any other unsuccessful answer
    /// is returned as [`Error::Http`]. A page without track rows is not an
    /// error here; it surfaces as [`Error::EmptyResult`] during ingestion.
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<RawPlaylist> {
        let url = format!("{}/playlist/{}", self.web_url, playlist_id);
        let res = self.client.get(&url).send().await?;
        if res.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("no playlist page at {url}")));
        }
        let body = res.error_for_status()?.text().await?;
        Ok(parse_playlist_page(&body, playlist_id))
    }
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn first_text(el: &ElementRef<'_>, css: &str) -> Option<String> {
    let sel = selector(css)?;
    el.select(&sel)
        .flat_map(|node| node.text())
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

fn first_attr(el: &ElementRef<'_>, css: &str, attr: &str) -> Option<String> {
    let sel = selector(css)?;
    el.select(&sel)
        .find_map(|node| node.value().attr(attr))
        .map(str::to_string)
}

fn playlist_name(doc: &Html) -> String {
    let root = doc.root_element();
    if let Some(name) = first_text(&root, "h1") {
        return name;
    }
    first_text(&root, "title")
        .map(|t| t.replace(" | Spotify Playlist", "").trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_PLAYLIST.to_string())
}

fn parse_row(row: &ElementRef<'_>) -> Option<RawTrack> {
    let href = first_attr(row, r#"a[href^="/track/"]"#, "href")?;
    let id = href
        .rsplit('/')
        .next()
        .and_then(|last| last.split('?').next())
        .filter(|id| !id.is_empty())?
        .to_string();

    let name = first_text(row, r#"p[data-encore-id="listRowTitle"] span"#)
        .or_else(|| first_text(row, r#"a[href^="/track/"]"#))
        .or_else(|| first_text(row, "p"));

    // comma split is naive ("Tyler, The Creator") but the page offers nothing better
    let artists = first_text(row, "span.encore-internal-color-text-subdued")
        .map(|text| {
            text.split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(|n| RawArtist {
                    id: Some(synthesize_artist_id(n)),
                    name: Some(n.to_string()),
                })
                .collect()
        })
        .unwrap_or_default();

    let images = first_attr(row, "img", "src")
        .map(|url| vec![RawImage { url }])
        .unwrap_or_default();

    Some(RawTrack {
        id: Some(id),
        name,
        duration_ms: Some(0),
        popularity: Some(0),
        album: Some(RawAlbum {
            images,
            ..RawAlbum::default()
        }),
        artists,
    })
}

/// Extracts playlist records from a playlist page.
///
/// Rows without a track link are dropped. The result may hold no tracks;
/// entity construction reports that case.
pub fn parse_playlist_page(html: &str, playlist_id: &str) -> RawPlaylist {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let description = first_attr(&root, r#"meta[name="description"]"#, "content");
    let items = match selector(r#"div[data-testid="track-row"]"#) {
        Some(rows) => root
            .select(&rows)
            .filter_map(|row| parse_row(&row))
            .map(|track| RawPlaylistItem { track: Some(track) })
            .collect(),
        None => Vec::new(),
    };

    RawPlaylist {
        id: Some(playlist_id.to_string()),
        name: Some(playlist_name(&doc)),
        description,
        tracks: RawTrackPage {
            items,
            next: None,
        },
    }
}
