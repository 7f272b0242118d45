//! TOML file configuration structures.
//!
//! These structs directly map to the `kassa-config.toml` file format.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub wallet: WalletConfig,
    #[serde(default)]
    pub deposits: DepositsConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("valid default address")
}

/// Admin configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// The admin secret. If this is plaintext (doesn't start with `$argon2`),
    /// it will be hashed and the config file will be rewritten.
    pub secret: String,
}

/// Deposit wallet section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// The TRON address receiving all deposits.
    pub address: String,
    /// The USDT TRC20 contract address.
    #[serde(default = "default_usdt_contract")]
    pub usdt_contract: String,
}

fn default_usdt_contract() -> String {
    // Mainnet USDT
    "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t".to_string()
}

/// Deposit limits section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositsConfig {
    #[serde(default = "default_min_amount")]
    pub min_amount: Decimal,
    #[serde(default = "default_max_amount")]
    pub max_amount: Decimal,
    #[serde(default = "default_max_pending")]
    pub max_pending_per_user: u32,
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: u32,
}

fn default_min_amount() -> Decimal {
    Decimal::from(30)
}

fn default_max_amount() -> Decimal {
    Decimal::from(20_000)
}

fn default_max_pending() -> u32 {
    3
}

fn default_expiry_minutes() -> u32 {
    10
}

impl Default for DepositsConfig {
    fn default() -> Self {
        Self {
            min_amount: default_min_amount(),
            max_amount: default_max_amount(),
            max_pending_per_user: default_max_pending(),
            expiry_minutes: default_expiry_minutes(),
        }
    }
}

/// Chain scanner section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    #[serde(default)]
    pub tronscan_api_key: Option<String>,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_sweep_interval() -> u64 {
    30
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            tronscan_api_key: None,
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl FileConfig {
    /// Check if the admin secret is already hashed (argon2 format).
    pub fn is_admin_secret_hashed(&self) -> bool {
        self.admin.secret.starts_with("$argon2")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[admin]
secret = "test-secret"

[wallet]
address = "TKassaWallet9999999999999999999999"

[deposits]
min_amount = 30
max_amount = 20000
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.wallet.address, "TKassaWallet9999999999999999999999");
        assert_eq!(config.deposits.max_pending_per_user, 3);
        assert_eq!(config.scanner.sweep_interval_secs, 30);
        assert!(!config.is_admin_secret_hashed());
    }

    #[test]
    fn test_deposit_limits_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[admin]
secret = "s"

[wallet]
address = "TKassaWallet9999999999999999999999"

[deposits]
min_amount = "50.5"
max_amount = "1000"
max_pending_per_user = 1
expiry_minutes = 5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.deposits.min_amount,
            Decimal::from_str("50.5").unwrap()
        );
        assert_eq!(config.deposits.max_pending_per_user, 1);
        assert_eq!(config.deposits.expiry_minutes, 5);
    }

    #[test]
    fn test_hashed_secret_detection() {
        let config = FileConfig {
            server: ServerConfig {
                listen: default_listen_addr(),
            },
            admin: AdminConfig {
                secret: "$argon2id$v=19$m=19456,t=2,p=1$abc123".to_string(),
            },
            wallet: WalletConfig {
                address: "TKassaWallet9999999999999999999999".to_string(),
                usdt_contract: default_usdt_contract(),
            },
            deposits: DepositsConfig::default(),
            scanner: ScannerConfig::default(),
        };
        assert!(config.is_admin_secret_hashed());
    }
}
