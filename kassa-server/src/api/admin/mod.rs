//! Admin API handlers.
//!
//! Operator endpoints, authenticated via `Authorization: Bearer` against the
//! hashed admin secret (see [`crate::api::extractors::AdminAuth`]). Manual
//! confirmation funnels through the same conditional status transition as the
//! automatic matcher, so the two paths can never double-credit.
//!
//! # Endpoints
//!
//! - `POST /deposits/{id}/confirm`      – manually confirm and credit
//! - `POST /deposits/{id}/reject`       – reject a pending deposit
//! - `GET  /deposits`                   – list deposits (paginated, filterable)
//! - `GET  /transfers/unattributed`     – manual-review transfer queue
//! - `GET  /scan-state`                 – scanner cursor freshness

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::state::AppState;

mod confirm_deposit;
mod list_deposits;
mod list_unattributed;
mod reject_deposit;
mod scan_state;

/// Build the Admin API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/deposits/{deposit_id}/confirm",
            post(confirm_deposit::confirm_deposit),
        )
        .route(
            "/deposits/{deposit_id}/reject",
            post(reject_deposit::reject_deposit),
        )
        .route("/deposits", get(list_deposits::list_deposits))
        .route(
            "/transfers/unattributed",
            get(list_unattributed::list_unattributed),
        )
        .route("/scan-state", get(scan_state::scan_state))
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in Admin API handlers.
#[derive(Debug)]
enum AdminApiError {
    /// A database query failed.
    Database(sqlx::Error),
    /// The requested deposit was not found.
    NotFound,
    /// The deposit already left the pending state.
    DepositNotPending,
    /// The transaction hash already settled another deposit.
    TxnHashAlreadyUsed { deposit_id: uuid::Uuid },
}

impl IntoResponse for AdminApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AdminApiError::Database(e) => {
                tracing::error!(error = %e, "Admin API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            AdminApiError::NotFound => {
                (StatusCode::NOT_FOUND, "deposit not found").into_response()
            }
            AdminApiError::DepositNotPending => {
                (StatusCode::CONFLICT, "deposit is not pending").into_response()
            }
            AdminApiError::TxnHashAlreadyUsed { deposit_id } => (
                StatusCode::CONFLICT,
                format!("transaction hash already settled deposit {deposit_id}"),
            )
                .into_response(),
        }
    }
}
