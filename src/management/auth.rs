use std::path::PathBuf;

use chrono::Utc;

use crate::{
    config,
    error::{Error, Result},
    types::{ClientSecret, Token},
    youtube,
};

/// Persisted YouTube OAuth token with transparent refresh.
pub struct TokenManager {
    token: Token,
    client: ClientSecret,
}

impl TokenManager {
    pub fn new(token: Token, client: ClientSecret) -> Self {
        TokenManager { token, client }
    }

    /// Loads the cached token written by a previous login.
    pub async fn load(client: ClientSecret) -> Result<Self> {
        let content = async_fs::read_to_string(Self::token_path()).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token, client })
    }

    pub async fn persist(&self) -> Result<()> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&path, json).await?;
        Ok(())
    }

    /// Access token, refreshed first when it is about to expire.
    ///
    /// # Errors
    ///
    /// [`Error::AuthFailure`] when the token is expired and the refresh
    /// token is missing or rejected; run `spotgraph auth` again.
    pub async fn get_valid_token(&mut self) -> Result<String> {
        if self.is_expired() {
            if self.token.refresh_token.is_empty() {
                return Err(Error::AuthFailure(
                    "YouTube token expired and no refresh token is stored".to_string(),
                ));
            }
            let mut fresh = youtube::refresh_token(&self.client, &self.token.refresh_token).await?;
            // Google only sends a refresh token on the first exchange
            if fresh.refresh_token.is_empty() {
                fresh.refresh_token = self.token.refresh_token.clone();
            }
            self.token = fresh;
            let _ = self.persist().await;
        }

        Ok(self.token.access_token.clone())
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + 240 >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/youtube-token.json");
        path
    }
}
