pub mod balance;
pub mod deposit;
pub mod scan_state;
pub mod tron_transfer;

use kassa_sdk::objects::{DepositStatus as SdkDepositStatus, TransferStatus as SdkTransferStatus};

/// Deposit lifecycle status for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see
/// `kassa_sdk::objects::DepositStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "deposit_status")]
pub enum DepositStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
    Expired,
}

impl DepositStatus {
    /// Whether a transition from `self` to `next` is allowed.
    ///
    /// `Pending` is the only non-terminal state; every terminal state has no
    /// outgoing transitions, so a deposit leaves `Pending` exactly once.
    pub fn can_transition_to(self, next: DepositStatus) -> bool {
        matches!(self, DepositStatus::Pending) && next != DepositStatus::Pending
    }

    /// Whether this status is terminal.
    pub fn is_terminal(self) -> bool {
        !matches!(self, DepositStatus::Pending)
    }
}

impl From<DepositStatus> for SdkDepositStatus {
    fn from(value: DepositStatus) -> Self {
        match value {
            DepositStatus::Pending => SdkDepositStatus::Pending,
            DepositStatus::Confirmed => SdkDepositStatus::Confirmed,
            DepositStatus::Rejected => SdkDepositStatus::Rejected,
            DepositStatus::Cancelled => SdkDepositStatus::Cancelled,
            DepositStatus::Expired => SdkDepositStatus::Expired,
        }
    }
}

impl From<SdkDepositStatus> for DepositStatus {
    fn from(value: SdkDepositStatus) -> Self {
        match value {
            SdkDepositStatus::Pending => DepositStatus::Pending,
            SdkDepositStatus::Confirmed => DepositStatus::Confirmed,
            SdkDepositStatus::Rejected => DepositStatus::Rejected,
            SdkDepositStatus::Cancelled => DepositStatus::Cancelled,
            SdkDepositStatus::Expired => DepositStatus::Expired,
        }
    }
}

/// Observed on-chain transfer status for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see
/// `kassa_sdk::objects::TransferStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "transfer_status")]
pub enum TransferStatus {
    Received,
    Matched,
    Unattributed,
    Ambiguous,
}

impl From<TransferStatus> for SdkTransferStatus {
    fn from(value: TransferStatus) -> Self {
        match value {
            TransferStatus::Received => SdkTransferStatus::Received,
            TransferStatus::Matched => SdkTransferStatus::Matched,
            TransferStatus::Unattributed => SdkTransferStatus::Unattributed,
            TransferStatus::Ambiguous => SdkTransferStatus::Ambiguous,
        }
    }
}

impl From<SdkTransferStatus> for TransferStatus {
    fn from(value: SdkTransferStatus) -> Self {
        match value {
            SdkTransferStatus::Received => TransferStatus::Received,
            SdkTransferStatus::Matched => TransferStatus::Matched,
            SdkTransferStatus::Unattributed => TransferStatus::Unattributed,
            SdkTransferStatus::Ambiguous => TransferStatus::Ambiguous,
        }
    }
}

/// Actor recorded in `confirmed_by` for matcher-driven confirmations.
pub const CONFIRMED_BY_SYSTEM: &str = "system";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_leaves_once() {
        let terminals = [
            DepositStatus::Confirmed,
            DepositStatus::Rejected,
            DepositStatus::Cancelled,
            DepositStatus::Expired,
        ];
        for next in terminals {
            assert!(DepositStatus::Pending.can_transition_to(next));
        }
        assert!(!DepositStatus::Pending.can_transition_to(DepositStatus::Pending));
    }

    #[test]
    fn test_terminal_states_have_no_transitions() {
        let all = [
            DepositStatus::Pending,
            DepositStatus::Confirmed,
            DepositStatus::Rejected,
            DepositStatus::Cancelled,
            DepositStatus::Expired,
        ];
        for from in all.into_iter().filter(|s| s.is_terminal()) {
            for next in all {
                assert!(!from.can_transition_to(next), "{from:?} -> {next:?}");
            }
        }
    }
}
