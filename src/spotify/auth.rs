use reqwest::{Client, StatusCode};

use crate::{
    config::SpotifyConfig,
    error::{Error, Result},
    types::ClientCredentialsResponse,
};

/// Obtains an application access token with the client-credentials grant.
///
/// The token is only good for public catalog data, which is all a playlist
/// import needs. No user login and no refresh token are involved, so a new
/// token is requested for every import.
///
/// # Arguments
///
/// * `client` - HTTP client reused afterwards for the playlist requests
/// * `config` - Spotify configuration holding `SPOTIFY_CLIENT_ID`,
///   `SPOTIFY_CLIENT_SECRET` and the token endpoint
///
/// # Request
///
/// `POST {token_url}` with `grant_type=client_credentials` as form body and
/// the client id and secret as HTTP basic authentication.
///
/// # Returns
///
/// The bearer access token string.
///
/// # Errors
///
/// - [`Error::AuthFailure`] when the client id or secret is missing, the
///   endpoint cannot be reached, or it answers `400`, `401` or `403`
/// - [`Error::AuthFailure`] when the answer carries an empty token
/// - [`Error::Http`] / [`Error::Json`] for other failed or unreadable
///   answers
///
/// # Example
///
/// ```
/// let client = reqwest::Client::new();
/// let config = Config::from_env();
/// let token = request_app_token(&client, &config.spotify).await?;
/// ```
pub async fn request_app_token(client: &Client, config: &SpotifyConfig) -> Result<String> {
    let (Some(client_id), Some(client_secret)) = (&config.client_id, &config.client_secret)
    else {
        return Err(Error::AuthFailure(
            "SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must be set".to_string(),
        ));
    };

    let res = client
        .post(&config.token_url)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| Error::AuthFailure(e.to_string()))?;

    if matches!(
        res.status(),
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
    ) {
        let body = res.text().await.unwrap_or_default();
        return Err(Error::AuthFailure(format!("token request rejected: {body}")));
    }

    let token = res
        .error_for_status()?
        .json::<ClientCredentialsResponse>()
        .await?;
    if token.access_token.is_empty() {
        return Err(Error::AuthFailure("empty access token".to_string()));
    }
    Ok(token.access_token)
}
