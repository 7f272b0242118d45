//! Payable-amount allocation.
//!
//! All deposits share one wallet address, so an incoming TRC20 transfer can
//! only be attributed to a user by its exact amount. The allocator reserves a
//! payable amount that no other pending deposit holds: the first attempt is
//! the requested amount itself, later attempts add a sub-cent jitter at the
//! 8th decimal. Reservation happens by inserting the pending row — the
//! partial unique index on `payable_amount` is the authoritative collision
//! check, so two concurrent allocations of the same candidate cannot both
//! succeed.

use crate::config::DepositsConfig;
use crate::entities::deposit::{Deposit, DepositInsert};
use crate::utils::usdt::{normalize, units_to_usdt};
use crate::utils::now_utc;
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;

/// Insert attempts before giving up with `CapacityExhausted`.
pub const MAX_ALLOCATION_ATTEMPTS: u32 = 8;

/// Largest jitter added to the requested amount, in units of 1e-8 USDT
/// (0.00009999 USDT), small enough that the user reads the payable amount as
/// the amount they asked for.
const JITTER_MAX_UNITS: i64 = 9_999;

/// Errors that can occur while opening a deposit.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// Requested amount outside the configured limits
    #[error("amount {amount} is outside the allowed range [{min}, {max}]")]
    AmountOutOfBounds {
        amount: Decimal,
        min: Decimal,
        max: Decimal,
    },

    /// The user already holds the maximum number of pending deposits
    #[error("user {user_id} already has {count} pending deposits")]
    TooManyPending { user_id: i64, count: i64 },

    /// Every candidate payable amount was taken
    #[error("no free payable amount after {MAX_ALLOCATION_ATTEMPTS} attempts")]
    CapacityExhausted,

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Produce the candidate payable amount for a given attempt.
///
/// Attempt 0 is the requested amount normalized to 8 decimals; later attempts
/// add a random jitter of 1..=9999 units of 1e-8 USDT.
pub fn payable_candidate(requested: Decimal, attempt: u32, rng: &mut impl Rng) -> Decimal {
    let base = normalize(requested);
    if attempt == 0 {
        return base;
    }
    base + units_to_usdt(rng.random_range(1..=JITTER_MAX_UNITS))
}

/// Open a pending deposit for `user_id` over `requested` USDT.
///
/// Validates the amount bounds and the per-user pending cap, then runs the
/// attempt-and-insert loop. Allocation and insertion are one operation, not
/// two phases, so there is no window in which a reserved amount exists only
/// in memory.
pub async fn allocate_deposit(
    pool: &PgPool,
    config: &DepositsConfig,
    wallet_address: &str,
    user_id: i64,
    requested: Decimal,
) -> Result<Deposit, AllocationError> {
    if requested < config.min_amount || requested > config.max_amount {
        return Err(AllocationError::AmountOutOfBounds {
            amount: requested,
            min: config.min_amount,
            max: config.max_amount,
        });
    }

    let pending = Deposit::count_pending_for_user(pool, user_id).await?;
    if pending >= i64::from(config.max_pending_per_user) {
        return Err(AllocationError::TooManyPending {
            user_id,
            count: pending,
        });
    }

    let expires_at = now_utc() + config.expiry_window();

    for attempt in 0..MAX_ALLOCATION_ATTEMPTS {
        // Scope the non-Send `ThreadRng` so it does not live across the
        // `insert_pending` await below; otherwise this future is not `Send`
        // and cannot be used as an axum handler.
        let payable_amount = {
            let mut rng = rand::rng();
            payable_candidate(requested, attempt, &mut rng)
        };
        let insert = DepositInsert {
            user_id,
            requested_amount: normalize(requested),
            payable_amount,
            wallet_address: wallet_address.to_owned(),
            expires_at,
        };

        match Deposit::insert_pending(pool, &insert).await {
            Ok(deposit) => return Ok(deposit),
            Err(e) if is_payable_conflict(&e) => {
                debug!(
                    user_id = user_id,
                    %payable_amount,
                    attempt = attempt,
                    "payable amount taken, retrying with fresh jitter"
                );
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(AllocationError::CapacityExhausted)
}

/// Whether an insert error is a collision on the pending payable-amount index.
fn is_payable_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.constraint() == Some("deposits_pending_payable_amount_key")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::usdt::USDT_SCALE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::str::FromStr;

    #[test]
    fn test_first_candidate_is_requested_amount() {
        let mut rng = StdRng::seed_from_u64(7);
        let requested = Decimal::from_str("100").unwrap();
        assert_eq!(payable_candidate(requested, 0, &mut rng), requested);
    }

    #[test]
    fn test_jitter_stays_close_to_requested() {
        let mut rng = StdRng::seed_from_u64(7);
        let requested = Decimal::from_str("100").unwrap();
        let bound = Decimal::from_str("0.0001").unwrap();
        for attempt in 1..100 {
            let candidate = payable_candidate(requested, attempt, &mut rng);
            assert!(candidate > requested);
            assert!(candidate - requested < bound);
            assert_eq!(candidate.scale(), USDT_SCALE);
        }
    }

    #[test]
    fn test_retries_produce_distinct_candidates() {
        let mut rng = StdRng::seed_from_u64(42);
        let requested = Decimal::from_str("99.97").unwrap();
        let candidates: std::collections::HashSet<Decimal> = (1..=10)
            .map(|attempt| payable_candidate(requested, attempt, &mut rng))
            .collect();
        assert!(candidates.len() > 1);
    }
}
