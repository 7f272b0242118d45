//! ExpirySweeper processor.
//!
//! Periodically moves pending deposits whose window has passed to `expired`,
//! releasing their payable-amount slots for reuse. The transition goes
//! through the same conditional update as every other status change, so a
//! deposit that the matcher confirms concurrently is simply skipped.

use crate::config::ScannerConfig;
use crate::entities::deposit::Deposit;
use crate::utils::now_utc;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tracing::{error, info};

/// ExpirySweeper expires stale pending deposits on a fixed interval.
pub struct ExpirySweeper {
    pool: PgPool,
    scanner: Arc<RwLock<ScannerConfig>>,
    shutdown_rx: watch::Receiver<bool>,
}

impl ExpirySweeper {
    pub fn new(
        pool: PgPool,
        scanner: Arc<RwLock<ScannerConfig>>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            pool,
            scanner,
            shutdown_rx,
        }
    }

    /// Run the ExpirySweeper.
    pub async fn run(mut self) {
        info!("ExpirySweeper started");

        loop {
            let interval = {
                let scanner = self.scanner.read().await;
                std::time::Duration::from_secs(scanner.sweep_interval_secs)
            };

            tokio::select! {
                biased;

                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        info!("ExpirySweeper received shutdown signal");
                        break;
                    }
                }

                _ = tokio::time::sleep(interval) => {
                    if let Err(e) = self.sweep_once().await {
                        error!(error = %e, "expiry sweep failed");
                    }
                }
            }
        }

        info!("ExpirySweeper shutdown complete");
    }

    /// Expire every overdue pending deposit. Idempotent.
    async fn sweep_once(&self) -> Result<u64, sqlx::Error> {
        let expired = Deposit::expire_due(&self.pool, now_utc()).await?;

        for deposit in &expired {
            info!(
                deposit_id = %deposit.id,
                user_id = deposit.user_id,
                payable_amount = %deposit.payable_amount,
                "deposit expired, payable amount released"
            );
        }

        Ok(expired.len() as u64)
    }
}
