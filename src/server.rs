use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    api,
    error::{Error, Result},
    types::PkceToken,
};

/// Binds the callback address.
///
/// Binding happens before the server task is spawned so a busy or malformed
/// `SERVER_ADDRESS` fails the login immediately.
///
/// # Errors
///
/// [`Error::Config`] for an address that does not parse, [`Error::Io`] when
/// the port cannot be bound.
pub async fn bind_api_server(address: &str) -> Result<TcpListener> {
    let addr = SocketAddr::from_str(address)
        .map_err(|e| Error::Config(format!("failed to parse server address {address}: {e}")))?;
    Ok(TcpListener::bind(&addr).await?)
}

/// Serves `/callback` and `/health` on `listener` until the task is aborted.
pub async fn start_api_server(
    state: Arc<Mutex<Option<PkceToken>>>,
    listener: TcpListener,
) -> Result<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(state));

    axum::serve(listener, app).await?;
    Ok(())
}
