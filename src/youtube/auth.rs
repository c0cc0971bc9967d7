use std::{path::Path, sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use serde_json::Value;
use tokio::sync::Mutex;

use super::{YOUTUBE_SCOPE, YoutubeClient};
use crate::{
    config::YoutubeConfig,
    error::{Error, Result},
    info,
    management::TokenManager,
    server::{bind_api_server, start_api_server},
    success,
    types::{ClientSecret, ClientSecretFile, PkceToken, Token},
    utils, warning,
};

/// Reads the OAuth client from a Google `client_secret.json`.
///
/// The file downloaded from the Google Cloud console holds the client
/// either under `installed` (desktop app) or under `web`; both are
/// accepted, `installed` first.
///
/// # Arguments
///
/// * `path` - location of the file, `YOUTUBE_CLIENT_SECRET_FILE`
///
/// # Errors
///
/// - [`Error::AuthFailure`] when the file cannot be read or has neither
///   section
/// - [`Error::Json`] when the file is not valid JSON
pub async fn read_client_secret(path: &Path) -> Result<ClientSecret> {
    let content = async_fs::read_to_string(path).await.map_err(|e| {
        Error::AuthFailure(format!(
            "cannot read client secret file {}: {}",
            path.display(),
            e
        ))
    })?;
    let file: ClientSecretFile = serde_json::from_str(&content)?;
    file.installed.or(file.web).ok_or_else(|| {
        Error::AuthFailure(format!(
            "{} has neither an 'installed' nor a 'web' client",
            path.display()
        ))
    })
}

/// Runs the browser login and caches the resulting token.
///
/// # Authentication Flow
///
/// 1. **Client**: Reads the OAuth client from `client_secret.json`
/// 2. **PKCE Setup**: Generates a verifier and its S256 challenge
/// 3. **Server Start**: Binds `SERVER_ADDRESS` and serves `/callback`
/// 4. **Browser Launch**: Opens the Google consent page, or prints the URL
///    when no browser can be started
/// 5. **Callback Handling**: The callback exchanges the code for a token
/// 6. **Token Persistence**: Writes the token to the data directory
///
/// `access_type=offline` and `prompt=consent` make Google hand out a
/// refresh token, which [`TokenManager`] uses for later runs.
///
/// # Arguments
///
/// * `config` - YouTube configuration (client secret file, callback address)
///
/// # Errors
///
/// - [`Error::Config`] or [`Error::Io`] when the callback address cannot be
///   bound; reported before the browser is opened
/// - [`Error::AuthFailure`] when no token arrives within two minutes or the
///   client secret file is unusable
/// - [`Error::Io`] when the token cannot be written
///
/// # Example
///
/// ```
/// let config = Config::from_env();
/// let tokens = login(&config.youtube).await?;
/// ```
pub async fn login(config: &YoutubeConfig) -> Result<TokenManager> {
    let client = read_client_secret(&config.client_secret_file).await?;
    let redirect_uri = config.redirect_uri();

    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier,
        client: client.clone(),
        redirect_uri: redirect_uri.clone(),
        token: None,
    })));

    let listener = bind_api_server(&config.server_address).await?;
    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state, listener).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = Url::parse_with_params(
        &client.auth_uri,
        &[
            ("client_id", client.client_id.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", YOUTUBE_SCOPE),
            ("code_challenge", code_challenge.as_str()),
            ("code_challenge_method", "S256"),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid auth_uri in client secret: {e}")))?;

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("Waiting for Google authorization in your browser...");
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    let token = token.ok_or_else(|| {
        Error::AuthFailure("YouTube authentication failed or timed out".to_string())
    })?;

    let manager = TokenManager::new(token, client);
    manager.persist().await?;
    success!("YouTube authentication successful!");
    Ok(manager)
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(120);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Cached credentials if present, otherwise a fresh browser login.
///
/// This is what the export commands call before touching the graph: a
/// cached token is loaded from the data directory and refreshed on first
/// use when needed; without one the interactive [`login`] runs.
///
/// # Errors
///
/// Everything [`read_client_secret`] and [`login`] can return.
///
/// # Example
///
/// ```
/// let mut sink = authenticated_client(&config.youtube).await?;
/// let playlist_id = sink.create_playlist("Road Trip").await?;
/// ```
pub async fn authenticated_client(config: &YoutubeConfig) -> Result<YoutubeClient> {
    let client = read_client_secret(&config.client_secret_file).await?;
    let tokens = match TokenManager::load(client).await {
        Ok(tokens) => tokens,
        Err(_) => {
            info!("No cached YouTube credentials, starting login...");
            login(config).await?
        }
    };
    Ok(YoutubeClient::new(&config.api_url, tokens))
}

fn token_from_json(json: &Value) -> Result<Token> {
    let access_token = json["access_token"].as_str().unwrap_or_default();
    if access_token.is_empty() {
        let reason = json["error_description"]
            .as_str()
            .or_else(|| json["error"].as_str())
            .unwrap_or("no access token in response");
        return Err(Error::AuthFailure(reason.to_string()));
    }

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Exchanges an authorization code (plus PKCE verifier) for a token.
///
/// Called by the `/callback` handler once Google redirects back.
///
/// # Arguments
///
/// * `client` - OAuth client from `client_secret.json`
/// * `redirect_uri` - the exact redirect URI used for the consent page
/// * `code` - authorization code from the callback query
/// * `verifier` - PKCE code verifier generated for this login
///
/// # Errors
///
/// [`Error::AuthFailure`] when the answer holds no access token (the
/// Google error description is used as message); [`Error::Http`] when the
/// token endpoint cannot be reached.
pub async fn exchange_code(
    client: &ClientSecret,
    redirect_uri: &str,
    code: &str,
    verifier: &str,
) -> Result<Token> {
    let res = Client::new()
        .post(&client.token_uri)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri),
        ])
        .send()
        .await?;

    let json: Value = res.json().await?;
    token_from_json(&json)
}

/// Trades a refresh token for a new access token.
///
/// Google usually omits the refresh token from this answer; the returned
/// [`Token`] then has an empty `refresh_token` and the caller keeps the
/// old one.
///
/// # Errors
///
/// [`Error::AuthFailure`] for every failure, including transport errors,
/// so callers can tell the user to run `spotgraph auth` again.
pub async fn refresh_token(client: &ClientSecret, refresh_token: &str) -> Result<Token> {
    let res = Client::new()
        .post(&client.token_uri)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
        ])
        .send()
        .await
        .map_err(|e| Error::AuthFailure(e.to_string()))?;

    let json: Value = res.json().await.map_err(|e| Error::AuthFailure(e.to_string()))?;
    token_from_json(&json)
}
