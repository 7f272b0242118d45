//! Chain scanner settings.

/// Settings for the TronScan indexer client and the expiry sweeper.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Optional TronScan API key (raises the rate limit).
    pub tronscan_api_key: Option<String>,
    /// Interval between expiry sweeper passes, in seconds.
    pub sweep_interval_secs: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            tronscan_api_key: None,
            sweep_interval_secs: 30,
        }
    }
}
