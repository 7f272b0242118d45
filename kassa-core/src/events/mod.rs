//! Event system for the settlement pipeline.
//!
//! # Event Flow
//!
//! 1. `DepositChanged` -> `ScanScheduler`
//! 2. `ScanScheduler` emits `ScanTick` -> `ScanRunner`
//! 3. `ScanRunner` hands each observed transfer to the `TransferMatcher`
//!
//! All events are idempotent and ephemeral - they carry identifiers rather
//! than full data, and processors re-fetch current state from the database.

pub mod channels;
pub mod types;

pub use channels::{
    deposit_changed_channel, scan_tick_channel, DepositChangedReceiver, DepositChangedSender,
    EventSenders, ScanTickReceiver, ScanTickSender, DEFAULT_CHANNEL_BUFFER,
};

pub use types::{DepositChanged, ScanTick};
