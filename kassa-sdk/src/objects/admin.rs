use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Observed on-chain transfer status as exposed over the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Received,
    Matched,
    Unattributed,
    Ambiguous,
}

/// Request payload for manually confirming a deposit.
///
/// `amount` defaults to the deposit's payable amount when omitted; used when
/// the operator credits a diverging on-chain amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmDepositRequest {
    #[serde(default)]
    pub amount: Option<Decimal>,
    pub txn_hash: String,
}

/// Request payload for rejecting a deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectDepositRequest {
    pub reason: String,
}

/// Query parameters for the admin deposit list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDepositsQuery {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub status: Option<super::DepositStatus>,
}

/// Query parameters for the manual-review transfer list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUnattributedQuery {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// A transfer awaiting manual review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnattributedTransferResponse {
    pub id: i64,
    pub from_address: String,
    pub txn_hash: String,
    pub value: Decimal,
    pub block_number: i64,
    pub block_timestamp: i64,
    pub status: TransferStatus,
    pub deposit_id: Option<Uuid>,
    pub created_at: i64,
}

/// Scanner cursor freshness, for ops dashboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanStateResponse {
    pub last_processed_block: i64,
    pub last_processed_at: i64,
    pub last_successful_scan: Option<i64>,
}

const MAX_PAGE_SIZE: i64 = 200;
const DEFAULT_PAGE_SIZE: i64 = 50;

/// Clamp user-supplied pagination to sane bounds.
pub fn clamp_pagination(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_pagination() {
        assert_eq!(clamp_pagination(None, None), (50, 0));
        assert_eq!(clamp_pagination(Some(0), Some(-5)), (1, 0));
        assert_eq!(clamp_pagination(Some(10_000), Some(30)), (200, 30));
    }
}
