use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use kanau::processor::Processor;
use kassa_core::entities::deposit::ListDepositsForUser;
use kassa_core::framework::DatabaseProcessor;

use super::{UserApiError, to_response};
use crate::state::AppState;

/// `GET /deposits/user/{user_id}` — the user's deposits, newest first.
pub(super) async fn list_deposits(
    state: State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, UserApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let deposits = processor
        .process(ListDepositsForUser { user_id })
        .await
        .map_err(UserApiError::Database)?;

    let response: Vec<_> = deposits.iter().map(to_response).collect();
    Ok(Json(response))
}
