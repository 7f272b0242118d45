//! Background task wiring for the settlement pipeline.

use kassa_core::config::SharedConfig;
use kassa_core::events::{DepositChangedReceiver, scan_tick_channel};
use kassa_core::processors::{
    ChainScanner, ExpirySweeper, ScanRunner, ScanScheduler, TronScanIndexer,
};
use sqlx::PgPool;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Spawn the scheduler, the scan runner and the expiry sweeper.
///
/// All three run until the shutdown signal flips; the caller awaits the
/// returned handles to let in-flight cycles finish.
pub async fn spawn_processors(
    pool: PgPool,
    config: SharedConfig,
    deposit_changed_rx: DepositChangedReceiver,
    shutdown_rx: watch::Receiver<bool>,
) -> Vec<JoinHandle<()>> {
    let (scan_tick_tx, scan_tick_rx) = scan_tick_channel();

    let scheduler = ScanScheduler::new(scan_tick_tx);
    let scheduler_handle = tokio::spawn({
        let shutdown_rx = shutdown_rx.clone();
        async move {
            scheduler.run(shutdown_rx, deposit_changed_rx).await;
        }
    });

    // The API key is read once at startup; a key change requires a restart,
    // unlike the wallet/limits sections which reload via SIGHUP.
    let api_key = config.scanner.read().await.tronscan_api_key.clone();
    let indexer = TronScanIndexer::new(api_key);
    let scanner = ChainScanner::new(indexer, pool.clone(), config.wallet.clone());
    let runner = ScanRunner::new(scanner, scan_tick_rx, shutdown_rx.clone());
    let scanner_handle = tokio::spawn(runner.run());

    let sweeper = ExpirySweeper::new(pool, config.scanner.clone(), shutdown_rx);
    let sweeper_handle = tokio::spawn(sweeper.run());

    vec![scheduler_handle, scanner_handle, sweeper_handle]
}
