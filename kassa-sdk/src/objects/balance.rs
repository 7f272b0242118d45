use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user's balance as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub user_id: i64,
    /// Spendable funds.
    pub available_balance: Decimal,
    /// Funds held against open payment requests.
    pub frozen_balance: Decimal,
}
