//! TransferMatcher processor.
//!
//! The TransferMatcher is responsible for:
//! - Recording each observed transfer (with conflict handling for idempotency)
//! - Finding the pending deposit whose payable amount equals the transfer
//!   amount exactly
//! - Settling the match: conditional deposit confirmation plus balance credit
//!   in one database transaction
//! - Keeping unmatched and ambiguous transfers for manual review
//!
//! Matching is keyed by exact amount and deduplicated by transaction hash, so
//! it is order-independent and safe to re-run over the same transfers.

use crate::entities::balance::UserBalance;
use crate::entities::deposit::Deposit;
use crate::entities::tron_transfer::{TronTransfer, TronTransferInsert};
use crate::entities::{CONFIRMED_BY_SYSTEM, DepositStatus, TransferStatus};
use itertools::Itertools;
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Errors that can occur during transfer matching.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// An incoming transfer to the service wallet, as observed by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingTransfer {
    pub from_address: String,
    pub to_address: String,
    pub txn_hash: String,
    pub value: Decimal,
    pub block_number: i64,
    pub block_timestamp: i64,
}

/// Outcome of matching one transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The transfer settled a pending deposit; the user was credited.
    Confirmed {
        deposit_id: Uuid,
        user_id: i64,
        amount: Decimal,
    },
    /// The transfer was seen and resolved before; nothing to do.
    AlreadyProcessed,
    /// No pending deposit holds this amount; kept for manual review.
    NoMatch { transfer_id: i64 },
    /// The matched deposit left pending before settlement (e.g. the sweeper
    /// won the race); kept for manual review since real funds arrived.
    NoLongerPending {
        transfer_id: i64,
        deposit_id: Uuid,
    },
    /// More than one pending deposit holds this amount. The payable-amount
    /// index should make this unreachable; never auto-credit here.
    Ambiguous {
        transfer_id: i64,
        candidates: usize,
    },
}

/// TransferMatcher attributes observed transfers to pending deposits.
pub struct TransferMatcher {
    pool: PgPool,
}

impl TransferMatcher {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Match one transfer against the pending deposits.
    pub async fn match_transfer(
        &self,
        transfer: &IncomingTransfer,
    ) -> Result<MatchOutcome, MatchError> {
        let transfer_id = match self.record_transfer(transfer).await? {
            Some(id) => id,
            None => return Ok(MatchOutcome::AlreadyProcessed),
        };

        let candidates = Deposit::find_pending_by_payable(&self.pool, transfer.value).await?;

        match candidates.into_iter().exactly_one() {
            Ok(deposit) => self.settle(transfer_id, transfer, deposit).await,
            Err(rest) => {
                let candidates = rest.count();
                if candidates == 0 {
                    TronTransfer::mark_unattributed(&self.pool, transfer_id).await?;
                    info!(
                        txn_hash = %transfer.txn_hash,
                        value = %transfer.value,
                        "transfer does not match any pending deposit, kept for review"
                    );
                    Ok(MatchOutcome::NoMatch { transfer_id })
                } else {
                    error!(
                        txn_hash = %transfer.txn_hash,
                        value = %transfer.value,
                        candidates = candidates,
                        "multiple pending deposits share one payable amount; \
                         refusing to guess, escalating to manual review"
                    );
                    TronTransfer::mark_ambiguous(&self.pool, transfer_id).await?;
                    Ok(MatchOutcome::Ambiguous {
                        transfer_id,
                        candidates,
                    })
                }
            }
        }
    }

    /// Record the transfer row, deduplicating by transaction hash.
    ///
    /// Returns the transfer id to resolve, or `None` when the transfer was
    /// already resolved. A transfer left in `received` (a crash between
    /// recording and settlement) is picked up again here.
    async fn record_transfer(
        &self,
        transfer: &IncomingTransfer,
    ) -> Result<Option<i64>, MatchError> {
        let insert = TronTransferInsert {
            from_address: transfer.from_address.clone(),
            to_address: transfer.to_address.clone(),
            txn_hash: transfer.txn_hash.clone(),
            value: transfer.value,
            block_number: transfer.block_number,
            block_timestamp: transfer.block_timestamp,
        };

        if let Some(id) = TronTransfer::insert(&self.pool, &insert).await? {
            return Ok(Some(id));
        }

        let existing = TronTransfer::find_by_txn_hash(&self.pool, &transfer.txn_hash).await?;
        match existing {
            Some(t) if t.status == TransferStatus::Received => Ok(Some(t.id)),
            _ => Ok(None),
        }
    }

    /// Settle a one-to-one match in a single database transaction.
    async fn settle(
        &self,
        transfer_id: i64,
        transfer: &IncomingTransfer,
        deposit: Deposit,
    ) -> Result<MatchOutcome, MatchError> {
        let mut tx = self.pool.begin().await?;

        // Compare-and-swap on the deposit status. Between the candidate query
        // and here the sweeper may have expired the deposit, or an admin may
        // have confirmed it manually.
        let applied = Deposit::confirm_tx(
            &mut tx,
            deposit.id,
            transfer.value,
            &transfer.txn_hash,
            CONFIRMED_BY_SYSTEM,
        )
        .await?;

        if !applied {
            tx.rollback().await?;
            return self.resolve_lost_race(transfer_id, transfer, deposit.id).await;
        }

        UserBalance::credit_tx(&mut tx, deposit.user_id, transfer.value).await?;
        TronTransfer::mark_matched_tx(&mut tx, transfer_id, deposit.id).await?;

        tx.commit().await?;

        info!(
            deposit_id = %deposit.id,
            user_id = deposit.user_id,
            txn_hash = %transfer.txn_hash,
            amount = %transfer.value,
            "deposit confirmed and credited"
        );

        Ok(MatchOutcome::Confirmed {
            deposit_id: deposit.id,
            user_id: deposit.user_id,
            amount: transfer.value,
        })
    }

    /// The deposit left pending between matching and settlement.
    async fn resolve_lost_race(
        &self,
        transfer_id: i64,
        transfer: &IncomingTransfer,
        deposit_id: Uuid,
    ) -> Result<MatchOutcome, MatchError> {
        let fresh = Deposit::get_by_id(&self.pool, deposit_id).await?;

        if let Some(fresh) = fresh {
            if fresh.status == DepositStatus::Confirmed
                && fresh.txn_hash.as_deref() == Some(transfer.txn_hash.as_str())
            {
                // Duplicate observation of a settlement that already went
                // through (e.g. manual admin confirm with the same hash).
                TronTransfer::mark_matched(&self.pool, transfer_id, deposit_id).await?;
                return Ok(MatchOutcome::AlreadyProcessed);
            }
        }

        warn!(
            deposit_id = %deposit_id,
            txn_hash = %transfer.txn_hash,
            value = %transfer.value,
            "matching deposit is no longer pending; funds arrived on-chain, \
             keeping transfer for manual reconciliation"
        );
        TronTransfer::mark_unattributed(&self.pool, transfer_id).await?;

        Ok(MatchOutcome::NoLongerPending {
            transfer_id,
            deposit_id,
        })
    }
}
