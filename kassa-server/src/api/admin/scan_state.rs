use axum::{Json, extract::State, response::IntoResponse};
use kanau::processor::Processor;
use kassa_core::entities::scan_state::GetScanState;
use kassa_core::framework::DatabaseProcessor;
use kassa_sdk::objects::ScanStateResponse;

use super::AdminApiError;
use crate::api::extractors::AdminAuth;
use crate::state::AppState;

/// `GET /scan-state` — the scanner cursor, for monitoring scan freshness.
pub(super) async fn scan_state(
    state: State<AppState>,
    _auth: AdminAuth,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let scan_state = processor
        .process(GetScanState)
        .await
        .map_err(AdminApiError::Database)?;

    Ok(Json(ScanStateResponse {
        last_processed_block: scan_state.last_processed_block,
        last_processed_at: scan_state.last_processed_at,
        last_successful_scan: scan_state
            .last_successful_scan
            .map(|t| t.assume_utc().unix_timestamp()),
    }))
}
