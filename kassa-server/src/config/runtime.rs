//! Runtime configuration re-exports and utilities.
//!
//! The actual config types are defined in `kassa-core::config`.
//! This module re-exports them for convenience.

pub use kassa_core::config::{
    AdminConfig, DepositsConfig, ScannerConfig, ServerConfig, SharedConfig, WalletConfig,
};
