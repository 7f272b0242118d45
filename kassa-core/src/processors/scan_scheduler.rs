//! ScanScheduler processor.
//!
//! The ScanScheduler is responsible for:
//! - Receiving `DepositChanged` events from the API handlers
//! - Emitting `ScanTick` events on an adaptive schedule
//!
//! The scan frequency is calculated from how recently the pending set
//! changed, using [`scan_freq`](crate::utils::scan_interval::scan_freq): a
//! fresh deposit polls every couple of seconds, an idle ledger once a minute.

use crate::events::{DepositChangedReceiver, ScanTick, ScanTickSender};
use crate::utils::now_utc;
use crate::utils::scan_interval::scan_freq;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// ScanScheduler drives the chain scanner's polling cadence.
pub struct ScanScheduler {
    tick_tx: ScanTickSender,
}

impl ScanScheduler {
    pub fn new(tick_tx: ScanTickSender) -> Self {
        Self { tick_tx }
    }

    /// Run until shutdown is signaled.
    pub async fn run(
        self,
        mut shutdown_rx: watch::Receiver<bool>,
        mut event_rx: DepositChangedReceiver,
    ) {
        info!("ScanScheduler started");

        let mut last_pending_at = time::PrimitiveDateTime::MIN;

        loop {
            let now = now_utc();
            let next_interval = scan_freq(last_pending_at, now);
            let sleep_duration =
                std::time::Duration::from_secs(next_interval.whole_seconds() as u64);

            tokio::select! {
                biased;

                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("ScanScheduler received shutdown signal");
                        break;
                    }
                }

                Some(event) = event_rx.recv() => {
                    last_pending_at = now_utc();
                    debug!(
                        deposit_id = %event.deposit_id,
                        user_id = event.user_id,
                        "deposit activity, recalculating scan interval"
                    );
                    // Skip the sleep and immediately recalculate.
                    continue;
                }

                _ = tokio::time::sleep(sleep_duration) => {
                    if self.tick_tx.send(ScanTick).await.is_err() {
                        warn!("failed to send ScanTick, receiver dropped");
                        break;
                    }
                    debug!(interval = %next_interval, "emitted ScanTick");
                }
            }
        }

        info!("ScanScheduler shutdown complete");
    }
}
