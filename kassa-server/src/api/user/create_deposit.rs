use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use kassa_core::allocator::allocate_deposit;
use kassa_core::events::DepositChanged;
use kassa_sdk::objects::CreateDepositRequest;

use super::{UserApiError, to_response};
use crate::state::AppState;

/// `POST /deposits/create-automated` — open an automated top-up.
///
/// Allocates a collision-free payable amount, persists the pending deposit
/// with its expiry window, then emits a `DepositChanged` event so the
/// settlement pipeline starts watching the chain for the payment.
pub(super) async fn create_deposit(
    state: State<AppState>,
    Json(body): Json<CreateDepositRequest>,
) -> Result<impl IntoResponse, UserApiError> {
    let deposits_config = state.config.deposits.read().await.clone();
    let wallet_address = state.config.wallet.read().await.address.clone();

    let deposit = allocate_deposit(
        &state.db,
        &deposits_config,
        &wallet_address,
        body.user_id,
        body.requested_amount,
    )
    .await?;

    let event = DepositChanged {
        deposit_id: deposit.id,
        user_id: deposit.user_id,
    };
    if let Err(e) = state.event_senders.deposit_changed.send(event).await {
        tracing::error!(error = %e, "Failed to emit DepositChanged event");
    }

    Ok((StatusCode::CREATED, Json(to_response(&deposit))))
}
