use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use kanau::processor::Processor;
use kassa_core::entities::balance::GetUserBalance;
use kassa_core::framework::DatabaseProcessor;
use kassa_sdk::objects::BalanceResponse;
use rust_decimal::Decimal;

use super::UserApiError;
use crate::state::AppState;

/// `GET /balance/{user_id}` — the user's available and frozen balance.
///
/// Users with no balance row yet read as zero; the row is created lazily on
/// first credit.
pub(super) async fn get_balance(
    state: State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, UserApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let balance = processor
        .process(GetUserBalance { user_id })
        .await
        .map_err(UserApiError::Database)?;

    let response = match balance {
        Some(b) => BalanceResponse {
            user_id: b.user_id,
            available_balance: b.available_balance,
            frozen_balance: b.frozen_balance,
        },
        None => BalanceResponse {
            user_id,
            available_balance: Decimal::ZERO,
            frozen_balance: Decimal::ZERO,
        },
    };

    Ok(Json(response))
}
