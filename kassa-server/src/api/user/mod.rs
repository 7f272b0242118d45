//! User API handlers.
//!
//! These endpoints are called by the wallet backend (Telegram mini-app) on
//! behalf of an authenticated user; user identity arrives as an explicit
//! `user_id` in the path or body.
//!
//! # Endpoints
//!
//! - `POST /deposits/create-automated` – open a top-up, get the payable amount
//! - `GET  /deposits/user/{user_id}`   – list the user's deposits
//! - `POST /deposits/{id}/cancel`      – cancel a pending deposit
//! - `GET  /balance/{user_id}`         – available/frozen balance
//!
//! # Error messages
//!
//! User-visible messages are in Russian, matching the wallet UI.

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use kassa_core::allocator::AllocationError;
use kassa_core::entities::deposit::Deposit;
use kassa_sdk::objects::DepositResponse;
use rust_decimal::Decimal;

use crate::state::AppState;

mod cancel_deposit;
mod create_deposit;
mod get_balance;
mod list_deposits;

/// Build the User API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/deposits/create-automated",
            post(create_deposit::create_deposit),
        )
        .route(
            "/deposits/user/{user_id}",
            get(list_deposits::list_deposits),
        )
        .route(
            "/deposits/{deposit_id}/cancel",
            post(cancel_deposit::cancel_deposit),
        )
        .route("/balance/{user_id}", get(get_balance::get_balance))
}

/// Convert a `Deposit` (DB model) into a `DepositResponse` (API model).
pub(crate) fn to_response(deposit: &Deposit) -> DepositResponse {
    DepositResponse {
        id: deposit.id,
        user_id: deposit.user_id,
        requested_amount: deposit.requested_amount,
        payable_amount: deposit.payable_amount,
        amount: deposit.amount,
        wallet_address: deposit.wallet_address.clone(),
        status: deposit.status.into(),
        txn_hash: deposit.txn_hash.clone(),
        expires_at: deposit.expires_at.assume_utc().unix_timestamp(),
        confirmed_at: deposit
            .confirmed_at
            .map(|t| t.assume_utc().unix_timestamp()),
        created_at: deposit.created_at.assume_utc().unix_timestamp(),
    }
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in User API handlers.
#[derive(Debug)]
enum UserApiError {
    /// A database query failed.
    Database(sqlx::Error),
    /// The requested deposit was not found.
    NotFound,
    /// The deposit is not in a pending state.
    DepositNotPending,
    /// The requested amount is outside the configured limits.
    AmountOutOfBounds { min: Decimal, max: Decimal },
    /// The user already holds the maximum number of pending deposits.
    TooManyPending { count: i64 },
    /// The allocator could not find a free payable amount.
    CapacityExhausted,
}

impl From<AllocationError> for UserApiError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::AmountOutOfBounds { min, max, .. } => {
                UserApiError::AmountOutOfBounds { min, max }
            }
            AllocationError::TooManyPending { count, .. } => UserApiError::TooManyPending { count },
            AllocationError::CapacityExhausted => UserApiError::CapacityExhausted,
            AllocationError::Database(e) => UserApiError::Database(e),
        }
    }
}

impl IntoResponse for UserApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            UserApiError::Database(e) => {
                tracing::error!(error = %e, "User API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            UserApiError::NotFound => {
                (StatusCode::NOT_FOUND, "заявка не найдена").into_response()
            }
            UserApiError::DepositNotPending => (
                StatusCode::CONFLICT,
                "заявка уже обработана и не может быть отменена",
            )
                .into_response(),
            UserApiError::AmountOutOfBounds { min, max } => (
                StatusCode::BAD_REQUEST,
                format!("сумма пополнения должна быть от {min} до {max} USDT"),
            )
                .into_response(),
            UserApiError::TooManyPending { count } => (
                StatusCode::CONFLICT,
                format!("уже открыто {count} заявки на пополнение, закройте одну из них"),
            )
                .into_response(),
            UserApiError::CapacityExhausted => (
                StatusCode::CONFLICT,
                "слишком много открытых заявок, попробуйте позже",
            )
                .into_response(),
        }
    }
}
