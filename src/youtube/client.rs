use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use super::PLAYLIST_DESCRIPTION;
use crate::{
    error::{Error, Result},
    export::SongSink,
    management::TokenManager,
    types::{
        CreatePlaylistRequest, CreatePlaylistResponse, PlaylistItemRequest, PlaylistItemSnippet,
        PlaylistSnippet, PlaylistStatus, ResourceId, SearchListResponse,
    },
};

/// YouTube Data API v3 client acting as the export sink.
pub struct YoutubeClient {
    client: Client,
    api_url: String,
    tokens: TokenManager,
}

impl YoutubeClient {
    pub fn new(api_url: &str, tokens: TokenManager) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.api_url, resource)
    }
}

/// Maps unsuccessful answers onto the error taxonomy.
async fn check(res: Response) -> Result<Response> {
    match res.status() {
        s if s.is_success() => Ok(res),
        StatusCode::UNAUTHORIZED => Err(Error::AuthFailure(
            "YouTube rejected the access token; run spotgraph auth".to_string(),
        )),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            let body = res.text().await.unwrap_or_default();
            Err(Error::QuotaExceeded(body))
        }
        StatusCode::NOT_FOUND => {
            let body = res.text().await.unwrap_or_default();
            Err(Error::NotFound(body))
        }
        _ => Ok(res.error_for_status()?),
    }
}

#[async_trait]
impl SongSink for YoutubeClient {
    /// Creates a private playlist and returns its id.
    async fn create_playlist(&mut self, name: &str) -> Result<String> {
        let token = self.tokens.get_valid_token().await?;
        let body = CreatePlaylistRequest {
            snippet: PlaylistSnippet {
                title: name.to_string(),
                description: PLAYLIST_DESCRIPTION.to_string(),
                default_language: "en".to_string(),
            },
            status: PlaylistStatus {
                privacy_status: "private".to_string(),
            },
        };

        let res = self
            .client
            .post(self.url("playlists"))
            .query(&[("part", "snippet,status")])
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let created = check(res).await?.json::<CreatePlaylistResponse>().await?;
        Ok(created.id)
    }

    /// Best match among videos, if any.
    async fn search_song(&mut self, query: &str) -> Result<Option<String>> {
        let token = self.tokens.get_valid_token().await?;
        let res = self
            .client
            .get(self.url("search"))
            .query(&[
                ("q", query),
                ("part", "id"),
                ("type", "video"),
                ("maxResults", "1"),
            ])
            .bearer_auth(token)
            .send()
            .await?;

        let found = check(res).await?.json::<SearchListResponse>().await?;
        Ok(found
            .items
            .into_iter()
            .find_map(|item| item.id.video_id))
    }

    async fn insert_item(&mut self, playlist_id: &str, video_id: &str) -> Result<()> {
        let token = self.tokens.get_valid_token().await?;
        let body = PlaylistItemRequest {
            snippet: PlaylistItemSnippet {
                playlist_id: playlist_id.to_string(),
                resource_id: ResourceId {
                    kind: "youtube#video".to_string(),
                    video_id: video_id.to_string(),
                },
            },
        };

        let res = self
            .client
            .post(self.url("playlistItems"))
            .query(&[("part", "snippet")])
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        check(res).await?;
        Ok(())
    }
}
