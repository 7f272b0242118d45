use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Deposit lifecycle status as exposed over the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
    Expired,
}

/// Request payload for opening an automated top-up.
///
/// Sent by the wallet backend on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDepositRequest {
    pub user_id: i64,
    pub requested_amount: Decimal,
}

/// Request payload for cancelling a pending deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelDepositRequest {
    pub user_id: i64,
}

/// Response returned by the deposit endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositResponse {
    /// Internal deposit ID.
    pub id: Uuid,
    /// Owning user.
    pub user_id: i64,
    /// Amount the user asked to deposit.
    pub requested_amount: Decimal,
    /// Amount the user must actually transfer; the attribution key.
    pub payable_amount: Decimal,
    /// Amount credited once confirmed.
    pub amount: Option<Decimal>,
    /// The service wallet address to transfer to.
    pub wallet_address: String,
    /// Current lifecycle status.
    pub status: DepositStatus,
    /// Matched on-chain transaction hash, once known.
    pub txn_hash: Option<String>,
    /// Unix timestamp after which a pending deposit expires.
    pub expires_at: i64,
    /// Unix timestamp of confirmation, if confirmed.
    pub confirmed_at: Option<i64>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format_is_lowercase() {
        let json = serde_json::to_string(&DepositStatus::Pending).unwrap();
        assert_eq!(json, r#""pending""#);
        let parsed: DepositStatus = serde_json::from_str(r#""expired""#).unwrap();
        assert_eq!(parsed, DepositStatus::Expired);
    }
}
