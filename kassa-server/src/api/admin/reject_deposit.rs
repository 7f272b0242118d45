use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use kanau::processor::Processor;
use kassa_core::entities::DepositStatus;
use kassa_core::entities::deposit::{Deposit, GetDepositById};
use kassa_core::framework::DatabaseProcessor;
use kassa_sdk::objects::RejectDepositRequest;
use uuid::Uuid;

use super::AdminApiError;
use crate::api::extractors::AdminAuth;
use crate::api::user::to_response;
use crate::state::AppState;

/// `POST /deposits/{deposit_id}/reject` — reject a pending deposit.
///
/// No balance effect: a rejected deposit was never credited.
pub(super) async fn reject_deposit(
    state: State<AppState>,
    _auth: AdminAuth,
    Path(deposit_id): Path<Uuid>,
    Json(body): Json<RejectDepositRequest>,
) -> Result<impl IntoResponse, AdminApiError> {
    let applied = Deposit::reject(&state.db, deposit_id, &body.reason)
        .await
        .map_err(AdminApiError::Database)?;

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let deposit = processor
        .process(GetDepositById { id: deposit_id })
        .await
        .map_err(AdminApiError::Database)?
        .ok_or(AdminApiError::NotFound)?;

    if !applied && deposit.status != DepositStatus::Rejected {
        return Err(AdminApiError::DepositNotPending);
    }

    tracing::info!(
        deposit_id = %deposit_id,
        reason = %body.reason,
        "deposit rejected"
    );

    Ok(Json(to_response(&deposit)))
}
