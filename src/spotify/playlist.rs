use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use super::{PlaylistSource, auth::request_app_token};
use crate::{
    config::SpotifyConfig,
    error::{Error, Result},
    types::{RawPlaylist, RawTrackPage},
};

/// Playlist source backed by the Spotify Web API.
///
/// Holds an application token obtained through the client-credentials
/// grant, so only public playlists are reachable. Every request is sent
/// with that token as bearer authorization.
pub struct SpotifyApi {
    client: Client,
    api_url: String,
    token: String,
}

impl SpotifyApi {
    /// Requests an application token and returns a ready client.
    ///
    /// # Arguments
    ///
    /// * `config` - Spotify credentials and endpoint URLs loaded from the
    ///   environment
    ///
    /// # Errors
    ///
    /// [`Error::AuthFailure`] when the credentials are missing or rejected.
    ///
    /// # Example
    ///
    /// ```
    /// let config = Config::from_env();
    /// let api = SpotifyApi::authenticate(&config.spotify).await?;
    /// let raw = api.fetch_playlist("37i9dQZF1DXcBWIGoYBM5M").await?;
    /// ```
    pub async fn authenticate(config: &SpotifyConfig) -> Result<Self> {
        let client = Client::new();
        let token = request_app_token(&client, config).await?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn get(&self, url: &str, playlist_id: &str) -> Result<Response> {
        let res = self.client.get(url).bearer_auth(&self.token).send().await?;
        match status_error(res.status(), playlist_id) {
            Some(err) => Err(err),
            None => Ok(res.error_for_status()?),
        }
    }
}

/// Maps the answers that mean "wrong credentials" or "no such playlist".
///
/// Spotify answers `403` for playlists an application token may not read
/// (editorial and personalised mixes), which to the user is the same as a
/// playlist that does not exist.
fn status_error(status: StatusCode, playlist_id: &str) -> Option<Error> {
    match status {
        StatusCode::UNAUTHORIZED => Some(Error::AuthFailure(
            "Spotify rejected the access token".to_string(),
        )),
        StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN => {
            Some(Error::NotFound(format!(
                "playlist {playlist_id} does not exist or is not public"
            )))
        }
        _ => None,
    }
}

#[async_trait]
impl PlaylistSource for SpotifyApi {
    /// Fetches the playlist and every page of its items.
    ///
    /// The first response carries the playlist metadata and the first page
    /// of items; `tracks.next` is then followed until Spotify stops
    /// returning a next URL. Items keep their source order.
    ///
    /// # Errors
    ///
    /// - [`Error::AuthFailure`] for a rejected token
    /// - [`Error::NotFound`] for an unknown, private or unreadable playlist
    /// - [`Error::Http`] for any other failed request
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<RawPlaylist> {
        let url = format!(
            "{uri}/playlists/{id}",
            uri = self.api_url,
            id = urlencoding::encode(playlist_id)
        );

        let mut playlist = self
            .get(&url, playlist_id)
            .await?
            .json::<RawPlaylist>()
            .await
            .map_err(|e| Error::NotFound(format!("unreadable playlist {playlist_id}: {e}")))?;

        let mut next = playlist.tracks.next.take();
        while let Some(next_url) = next {
            let page = self
                .get(&next_url, playlist_id)
                .await?
                .json::<RawTrackPage>()
                .await?;
            playlist.tracks.items.extend(page.items);
            next = page.next;
        }

        Ok(playlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_playlist_is_not_found() {
        let err = status_error(StatusCode::FORBIDDEN, "37i9dQZF1DXcBWIGoYBM5M").unwrap();
        assert!(matches!(err, Error::NotFound(msg) if msg.contains("37i9dQZF1DXcBWIGoYBM5M")));
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "x"),
            Some(Error::AuthFailure(_))
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "x"),
            Some(Error::NotFound(_))
        ));
        assert!(status_error(StatusCode::OK, "x").is_none());
        assert!(status_error(StatusCode::INTERNAL_SERVER_ERROR, "x").is_none());
    }
}
