//! ChainScanner processor.
//!
//! The ChainScanner is responsible for:
//! - Receiving `ScanTick` events
//! - Loading the persisted scan cursor
//! - Fetching new transfers to the service wallet from the TronScan API
//! - Handing each transfer to the `TransferMatcher` in block order
//! - Advancing the cursor only after a cycle completes without error
//!
//! A failed cycle leaves the cursor untouched; the next cycle re-fetches the
//! same window, which is safe because the matcher deduplicates by transaction
//! hash.

use crate::config::WalletConfig;
use crate::entities::scan_state::TronScanState;
use crate::events::ScanTickReceiver;
use crate::processors::transfer_matcher::{
    IncomingTransfer, MatchError, MatchOutcome, TransferMatcher,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};

/// Errors that can occur during a scan cycle.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// API request error
    #[error("API request error: {0}")]
    Request(#[from] reqwest::Error),

    /// API response parsing error
    #[error("API response parsing error: {0}")]
    Parse(String),

    /// Rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },
}

impl From<MatchError> for ScanError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::Database(e) => ScanError::Database(e),
        }
    }
}

/// Trait for the TRON indexer the scanner polls.
///
/// Abstracted so the scan cycle can run against a mock in tests.
#[async_trait]
pub trait TronIndexer: Send + Sync {
    /// Fetch TRC20 transfers to `wallet_address` observed at or after
    /// `min_timestamp` (unix millis).
    async fn fetch_transfers(
        &self,
        wallet_address: &str,
        contract_address: &str,
        min_timestamp: i64,
    ) -> Result<Vec<TronTransferData>, ScanError>;
}

/// TronScan-backed indexer implementation.
pub struct TronScanIndexer {
    http_client: reqwest::Client,
    api_key: Option<String>,
}

impl TronScanIndexer {
    const TRONSCAN_API_URL: &str = "https://apilist.tronscanapi.com/api/filter/trc20/transfers";

    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl TronIndexer for TronScanIndexer {
    async fn fetch_transfers(
        &self,
        wallet_address: &str,
        contract_address: &str,
        min_timestamp: i64,
    ) -> Result<Vec<TronTransferData>, ScanError> {
        let mut request = self.http_client.get(Self::TRONSCAN_API_URL).query(&[
            ("limit", "200"),
            ("contract_address", contract_address),
            ("toAddress", wallet_address),
            ("start_timestamp", min_timestamp.to_string().as_str()),
        ]);

        if let Some(key) = &self.api_key {
            request = request.header("TRON-PRO-API-KEY", key);
        }

        let response = request.send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ScanError::RateLimited {
                retry_after_secs: 5,
            });
        }

        let response: TronScanResponse = response.json().await?;
        Ok(response.token_transfers)
    }
}

/// What one scan cycle did, for logging.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanSummary {
    pub processed: u32,
    pub confirmed: u32,
    pub duplicates: u32,
    pub unmatched: u32,
    pub faults: u32,
}

impl ScanSummary {
    fn record(&mut self, outcome: &MatchOutcome) {
        self.processed += 1;
        match outcome {
            MatchOutcome::Confirmed { .. } => self.confirmed += 1,
            MatchOutcome::AlreadyProcessed => self.duplicates += 1,
            MatchOutcome::NoMatch { .. } | MatchOutcome::NoLongerPending { .. } => {
                self.unmatched += 1
            }
            MatchOutcome::Ambiguous { .. } => self.faults += 1,
        }
    }
}

/// ChainScanner polls the indexer and feeds the matcher.
pub struct ChainScanner<I: TronIndexer> {
    indexer: I,
    pool: PgPool,
    matcher: TransferMatcher,
    wallet: Arc<RwLock<WalletConfig>>,
}

impl<I: TronIndexer> ChainScanner<I> {
    pub fn new(indexer: I, pool: PgPool, wallet: Arc<RwLock<WalletConfig>>) -> Self {
        let matcher = TransferMatcher::new(pool.clone());
        Self {
            indexer,
            pool,
            matcher,
            wallet,
        }
    }

    /// Run one scan cycle: fetch, match in block order, advance the cursor.
    pub async fn scan_cycle(&self) -> Result<ScanSummary, ScanError> {
        let cursor = TronScanState::load(&self.pool).await?;
        let wallet = self.wallet.read().await.clone();

        debug!(
            last_processed_block = cursor.last_processed_block,
            last_processed_at = cursor.last_processed_at,
            "fetching TRC20 transfers"
        );

        let raw = self
            .indexer
            .fetch_transfers(
                &wallet.address,
                &wallet.usdt_contract,
                cursor.last_processed_at,
            )
            .await?;

        let mut transfers = normalize_transfers(raw, &wallet.address, cursor.last_processed_block)?;
        transfers.sort_by_key(|t| t.block_number);

        let mut summary = ScanSummary::default();
        let mut max_block = cursor.last_processed_block;
        let mut max_timestamp = cursor.last_processed_at;

        for transfer in transfers {
            let outcome = self.matcher.match_transfer(&transfer).await?;
            summary.record(&outcome);
            max_block = max_block.max(transfer.block_number);
            max_timestamp = max_timestamp.max(transfer.block_timestamp);
        }

        // Persisted only after every transfer in the window was handled, so a
        // failed cycle re-scans instead of skipping.
        TronScanState::advance(&self.pool, max_block, max_timestamp).await?;

        Ok(summary)
    }
}

/// Convert raw indexer items into matcher input.
///
/// Drops transfers to other addresses and transfers at or below the block
/// cursor (overlap at the cursor boundary is expected).
fn normalize_transfers(
    raw: Vec<TronTransferData>,
    wallet_address: &str,
    last_processed_block: i64,
) -> Result<Vec<IncomingTransfer>, ScanError> {
    let mut transfers = Vec::with_capacity(raw.len());

    for item in raw {
        if !item.to_address.eq_ignore_ascii_case(wallet_address) {
            continue;
        }
        if item.block <= last_processed_block {
            continue;
        }

        let value: Decimal = item
            .quant
            .parse()
            .map_err(|e| ScanError::Parse(format!("invalid transfer value: {e}")))?;
        let divisor = Decimal::from(10u64.pow(item.decimals as u32));

        transfers.push(IncomingTransfer {
            from_address: item.from_address,
            to_address: item.to_address,
            txn_hash: item.transaction_id,
            value: value / divisor,
            block_number: item.block,
            block_timestamp: item.block_ts,
        });
    }

    Ok(transfers)
}

/// Runner wrapping a `ChainScanner` in the tick/shutdown select loop.
pub struct ScanRunner<I: TronIndexer> {
    scanner: ChainScanner<I>,
    tick_rx: ScanTickReceiver,
    shutdown_rx: watch::Receiver<bool>,
}

impl<I: TronIndexer + 'static> ScanRunner<I> {
    pub fn new(
        scanner: ChainScanner<I>,
        tick_rx: ScanTickReceiver,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            scanner,
            tick_rx,
            shutdown_rx,
        }
    }

    /// Run until shutdown. A mid-cycle abort never advances the cursor.
    pub async fn run(mut self) {
        info!("ScanRunner started");

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        info!("ScanRunner received shutdown signal");
                        break;
                    }
                }

                Some(_) = self.tick_rx.recv() => {
                    match self.scanner.scan_cycle().await {
                        Ok(summary) => {
                            debug!(
                                processed = summary.processed,
                                confirmed = summary.confirmed,
                                duplicates = summary.duplicates,
                                unmatched = summary.unmatched,
                                faults = summary.faults,
                                "scan cycle completed"
                            );
                        }
                        Err(e) => {
                            // Transient by assumption: cursor untouched, the
                            // next tick re-scans the same window.
                            warn!(error = %e, "scan cycle failed, will retry");
                        }
                    }
                }

                else => {
                    info!("ScanTick channel closed");
                    break;
                }
            }
        }

        info!("ScanRunner shutdown complete");
    }
}

// API response types for TronScan
#[derive(Debug, serde::Deserialize)]
struct TronScanResponse {
    #[serde(default)]
    token_transfers: Vec<TronTransferData>,
}

#[derive(Debug, serde::Deserialize)]
pub struct TronTransferData {
    pub transaction_id: String,
    pub block_ts: i64,
    pub block: i64,
    pub from_address: String,
    pub to_address: String,
    pub quant: String,
    #[serde(default = "default_decimals")]
    pub decimals: i32,
}

fn default_decimals() -> i32 {
    6 // TRC-20 USDT uses 6 decimals
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn raw(txn: &str, to: &str, block: i64, quant: &str) -> TronTransferData {
        TronTransferData {
            transaction_id: txn.to_string(),
            block_ts: block * 3_000,
            block,
            from_address: "TSenderAddress111111111111111111111".to_string(),
            to_address: to.to_string(),
            quant: quant.to_string(),
            decimals: 6,
        }
    }

    #[test]
    fn test_normalize_filters_and_scales() {
        const WALLET: &str = "TKassaWallet9999999999999999999999";
        let items = vec![
            raw("a", WALLET, 10, "99970000"),
            raw("b", "TSomeoneElse", 11, "5000000"),
            raw("c", WALLET, 5, "1000000"),
        ];

        let transfers = normalize_transfers(items, WALLET, 7).unwrap();

        // "b" goes to another wallet, "c" is behind the cursor
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].txn_hash, "a");
        assert_eq!(
            transfers[0].value,
            Decimal::from_str("99.97").unwrap()
        );
    }

    #[test]
    fn test_normalize_rejects_garbage_amounts() {
        const WALLET: &str = "TKassaWallet9999999999999999999999";
        let items = vec![raw("a", WALLET, 10, "not-a-number")];
        assert!(normalize_transfers(items, WALLET, 0).is_err());
    }
}
