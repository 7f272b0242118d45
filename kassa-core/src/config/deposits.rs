//! Deposit limits and expiry policy.

use rust_decimal::Decimal;

/// Limits applied when a user opens a deposit.
#[derive(Debug, Clone)]
pub struct DepositsConfig {
    /// Minimum deposit amount in USDT.
    pub min_amount: Decimal,
    /// Maximum deposit amount in USDT.
    pub max_amount: Decimal,
    /// How many deposits one user may hold in pending at once.
    pub max_pending_per_user: u32,
    /// How long a pending deposit waits for its transfer before expiring.
    pub expiry_minutes: u32,
}

impl Default for DepositsConfig {
    fn default() -> Self {
        Self {
            min_amount: Decimal::from(30),
            max_amount: Decimal::from(20_000),
            max_pending_per_user: 3,
            expiry_minutes: 10,
        }
    }
}

impl DepositsConfig {
    /// The expiry window as a `time::Duration`.
    pub fn expiry_window(&self) -> time::Duration {
        time::Duration::minutes(i64::from(self.expiry_minutes))
    }
}
