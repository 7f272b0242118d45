//! Typed HTTP clients for the Kassa server.
//!
//! [`UserClient`] covers the wallet-facing endpoints (called by the
//! mini-app's backend on behalf of an authenticated user). [`AdminClient`]
//! covers the operator endpoints and carries the admin secret as a bearer
//! token.

mod admin;
mod user;

pub use admin::AdminClient;
pub use user::UserClient;

/// Errors returned by the API clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
