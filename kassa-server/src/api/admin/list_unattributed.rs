use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use kanau::processor::Processor;
use kassa_core::entities::tron_transfer::ListUnattributedTransfers;
use kassa_core::framework::DatabaseProcessor;
use kassa_sdk::objects::{ListUnattributedQuery, UnattributedTransferResponse, clamp_pagination};

use super::AdminApiError;
use crate::api::extractors::AdminAuth;
use crate::state::AppState;

/// `GET /transfers/unattributed` — transfers kept for manual review.
///
/// Covers both transfers that matched no pending deposit and the
/// should-be-impossible ambiguous matches.
pub(super) async fn list_unattributed(
    state: State<AppState>,
    _auth: AdminAuth,
    Query(query): Query<ListUnattributedQuery>,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let (limit, offset) = clamp_pagination(query.limit, query.offset);

    let transfers = processor
        .process(ListUnattributedTransfers { limit, offset })
        .await
        .map_err(AdminApiError::Database)?;

    let response: Vec<_> = transfers
        .into_iter()
        .map(|t| UnattributedTransferResponse {
            id: t.id,
            from_address: t.from_address,
            txn_hash: t.txn_hash,
            value: t.value,
            block_number: t.block_number,
            block_timestamp: t.block_timestamp,
            status: t.status.into(),
            deposit_id: t.deposit_id,
            created_at: t.created_at.assume_utc().unix_timestamp(),
        })
        .collect();

    Ok(Json(response))
}
