//! Event channel factories and handles.

use super::types::{DepositChanged, ScanTick};
use tokio::sync::mpsc;

/// Default buffer size for event channels.
///
/// This provides enough buffer to handle bursts while keeping memory bounded.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Sender handle for DepositChanged events.
pub type DepositChangedSender = mpsc::Sender<DepositChanged>;
/// Receiver handle for DepositChanged events.
pub type DepositChangedReceiver = mpsc::Receiver<DepositChanged>;

/// Sender handle for ScanTick events.
pub type ScanTickSender = mpsc::Sender<ScanTick>;
/// Receiver handle for ScanTick events.
pub type ScanTickReceiver = mpsc::Receiver<ScanTick>;

/// Create a new DepositChanged channel.
///
/// Multiple senders can be cloned from the returned sender (one per API
/// handler path that mutates the pending set).
pub fn deposit_changed_channel() -> (DepositChangedSender, DepositChangedReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}

/// Create a new ScanTick channel.
pub fn scan_tick_channel() -> (ScanTickSender, ScanTickReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}

/// Container for the event senders handed to API handlers.
#[derive(Clone)]
pub struct EventSenders {
    /// Sender for DepositChanged events.
    pub deposit_changed: DepositChangedSender,
}

impl EventSenders {
    /// Create a new EventSenders container.
    pub fn new(deposit_changed: DepositChangedSender) -> Self {
        Self { deposit_changed }
    }
}
