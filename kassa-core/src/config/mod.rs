//! Configuration types for the Kassa settlement backend.
//!
//! These types represent the validated runtime configuration used by the
//! server and the background processors. The actual config loading/parsing is
//! handled by the server crate.

mod admin;
mod deposits;
mod scanner;
mod server;
mod wallet;

pub use admin::AdminConfig;
pub use deposits::DepositsConfig;
pub use scanner::ScannerConfig;
pub use server::ServerConfig;
pub use wallet::WalletConfig;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared configuration state with separate locks for each section.
///
/// This allows independent access to different configuration sections
/// without blocking other readers/writers. Background processors read the
/// relevant section at the start of each cycle, so a SIGHUP reload takes
/// effect without restarting them.
#[derive(Clone)]
pub struct SharedConfig {
    /// Server configuration (listen address, etc.).
    pub server: Arc<RwLock<ServerConfig>>,
    /// Admin configuration (authentication).
    pub admin: Arc<RwLock<AdminConfig>>,
    /// The service deposit wallet.
    pub wallet: Arc<RwLock<WalletConfig>>,
    /// Deposit limits and expiry policy.
    pub deposits: Arc<RwLock<DepositsConfig>>,
    /// Chain scanner settings.
    pub scanner: Arc<RwLock<ScannerConfig>>,
}
