use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use kanau::processor::Processor;
use kassa_core::entities::DepositStatus;
use kassa_core::entities::deposit::{Deposit, GetDepositById};
use kassa_core::events::DepositChanged;
use kassa_core::framework::DatabaseProcessor;
use kassa_sdk::objects::CancelDepositRequest;
use uuid::Uuid;

use super::{UserApiError, to_response};
use crate::state::AppState;

/// `POST /deposits/{deposit_id}/cancel` — cancel a pending deposit.
///
/// The conditional update only applies while the deposit is still pending and
/// owned by the caller; a deposit the matcher confirmed a moment earlier
/// stays confirmed.
pub(super) async fn cancel_deposit(
    state: State<AppState>,
    Path(deposit_id): Path<Uuid>,
    Json(body): Json<CancelDepositRequest>,
) -> Result<impl IntoResponse, UserApiError> {
    let cancelled = Deposit::cancel(&state.db, deposit_id, body.user_id)
        .await
        .map_err(UserApiError::Database)?;

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let deposit = processor
        .process(GetDepositById { id: deposit_id })
        .await
        .map_err(UserApiError::Database)?
        .filter(|d| d.user_id == body.user_id)
        .ok_or(UserApiError::NotFound)?;

    if !cancelled && deposit.status != DepositStatus::Cancelled {
        return Err(UserApiError::DepositNotPending);
    }

    let event = DepositChanged {
        deposit_id: deposit.id,
        user_id: deposit.user_id,
    };
    if let Err(e) = state.event_senders.deposit_changed.send(event).await {
        tracing::error!(error = %e, "Failed to emit DepositChanged event");
    }

    Ok(Json(to_response(&deposit)))
}
