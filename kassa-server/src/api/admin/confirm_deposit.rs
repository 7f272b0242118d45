use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use kanau::processor::Processor;
use kassa_core::entities::DepositStatus;
use kassa_core::entities::balance::UserBalance;
use kassa_core::entities::deposit::{Deposit, GetDepositById};
use kassa_core::framework::DatabaseProcessor;
use kassa_sdk::objects::ConfirmDepositRequest;
use uuid::Uuid;

use super::AdminApiError;
use crate::api::extractors::AdminAuth;
use crate::api::user::to_response;
use crate::state::AppState;

/// Actor recorded for manual confirmations.
const CONFIRMED_BY_ADMIN: &str = "admin";

/// `POST /deposits/{deposit_id}/confirm` — manually confirm a deposit.
///
/// Used when the automatic matcher could not attribute a transfer (e.g. the
/// user sent a diverging amount). Credits the supplied amount, or the payable
/// amount if none is given. Idempotent: re-confirming with the same
/// transaction hash returns the current state without a second credit.
pub(super) async fn confirm_deposit(
    state: State<AppState>,
    _auth: AdminAuth,
    Path(deposit_id): Path<Uuid>,
    Json(body): Json<ConfirmDepositRequest>,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let deposit = processor
        .process(GetDepositById { id: deposit_id })
        .await
        .map_err(AdminApiError::Database)?
        .ok_or(AdminApiError::NotFound)?;

    if deposit.status == DepositStatus::Confirmed
        && deposit.txn_hash.as_deref() == Some(body.txn_hash.as_str())
    {
        return Ok(Json(to_response(&deposit)));
    }

    // One on-chain transaction settles at most one deposit.
    if let Some(other) = Deposit::find_confirmed_by_txn_hash(&state.db, &body.txn_hash)
        .await
        .map_err(AdminApiError::Database)?
    {
        if other.id != deposit_id {
            return Err(AdminApiError::TxnHashAlreadyUsed { deposit_id: other.id });
        }
    }

    let actual_amount = body.amount.unwrap_or(deposit.payable_amount);

    // Same compare-and-swap plus credit as the automatic matcher: whichever
    // path transitions the deposit out of pending first wins, the other
    // observes the changed status and does nothing.
    let mut tx = state.db.begin().await.map_err(AdminApiError::Database)?;

    let applied = Deposit::confirm_tx(
        &mut tx,
        deposit_id,
        actual_amount,
        &body.txn_hash,
        CONFIRMED_BY_ADMIN,
    )
    .await
    .map_err(AdminApiError::Database)?;

    if !applied {
        tx.rollback().await.map_err(AdminApiError::Database)?;
        return Err(AdminApiError::DepositNotPending);
    }

    UserBalance::credit_tx(&mut tx, deposit.user_id, actual_amount)
        .await
        .map_err(AdminApiError::Database)?;

    tx.commit().await.map_err(AdminApiError::Database)?;

    tracing::info!(
        deposit_id = %deposit_id,
        user_id = deposit.user_id,
        amount = %actual_amount,
        txn_hash = %body.txn_hash,
        "deposit manually confirmed"
    );

    let updated = processor
        .process(GetDepositById { id: deposit_id })
        .await
        .map_err(AdminApiError::Database)?
        .ok_or(AdminApiError::NotFound)?;

    Ok(Json(to_response(&updated)))
}
