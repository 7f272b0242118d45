use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use kanau::processor::Processor;
use kassa_core::entities::deposit::ListDeposits;
use kassa_core::framework::DatabaseProcessor;
use kassa_sdk::objects::{ListDepositsQuery, clamp_pagination};

use super::AdminApiError;
use crate::api::extractors::AdminAuth;
use crate::api::user::to_response;
use crate::state::AppState;

/// `GET /deposits` — list deposits with pagination and an optional status
/// filter, newest first.
pub(super) async fn list_deposits(
    state: State<AppState>,
    _auth: AdminAuth,
    Query(query): Query<ListDepositsQuery>,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let (limit, offset) = clamp_pagination(query.limit, query.offset);

    let deposits = processor
        .process(ListDeposits {
            limit,
            offset,
            status: query.status.map(Into::into),
        })
        .await
        .map_err(AdminApiError::Database)?;

    let response: Vec<_> = deposits.iter().map(to_response).collect();
    Ok(Json(response))
}
