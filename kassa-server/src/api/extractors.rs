//! Custom Axum extractors for request authentication.
//!
//! Provides `AdminAuth` — verifies the `Authorization: Bearer {secret}`
//! header against the argon2-hashed admin secret from the configuration.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// An Axum extractor that authenticates the admin API.
///
/// # Header format
///
/// ```text
/// Authorization: Bearer {admin_secret}
/// ```
///
/// The plaintext secret is verified against the stored argon2 hash, so the
/// secret itself never lives in server memory beyond the request.
pub struct AdminAuth;

/// Errors returned by the [`AdminAuth`] extractor.
#[derive(Debug)]
pub enum AdminAuthError {
    MissingHeader,
    InvalidHeader,
    VerificationFailed,
}

impl IntoResponse for AdminAuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AdminAuthError::MissingHeader => {
                (StatusCode::UNAUTHORIZED, "missing Authorization header")
            }
            AdminAuthError::InvalidHeader => {
                (StatusCode::BAD_REQUEST, "invalid Authorization header")
            }
            AdminAuthError::VerificationFailed => {
                (StatusCode::UNAUTHORIZED, "admin secret verification failed")
            }
        };
        (status, message).into_response()
    }
}

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AdminAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AdminAuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AdminAuthError::InvalidHeader)?;

        let secret = header_value
            .strip_prefix("Bearer ")
            .ok_or(AdminAuthError::InvalidHeader)?;

        let admin = state.config.admin.read().await;
        if !admin.verify_secret(secret) {
            return Err(AdminAuthError::VerificationFailed);
        }
        drop(admin);

        Ok(AdminAuth)
    }
}
