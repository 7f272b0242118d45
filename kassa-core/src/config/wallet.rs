//! Deposit wallet configuration.

/// The single service-wide TRC20 deposit wallet.
///
/// Deposits are not disambiguated by address (there is only one); attribution
/// is entirely via the allocated payable amount.
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// The TRON wallet address receiving all deposits.
    pub address: String,
    /// The USDT TRC20 token contract address.
    pub usdt_contract: String,
}
