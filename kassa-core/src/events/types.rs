//! Event type definitions for the settlement pipeline.

use uuid::Uuid;

/// Event emitted when the set of pending deposits changes.
///
/// This is the entry point for the pipeline. It tells the `ScanScheduler`
/// there is fresh activity, so the chain should be polled more aggressively.
#[derive(Debug, Clone)]
pub struct DepositChanged {
    pub deposit_id: Uuid,
    pub user_id: i64,
}

/// Event emitted by the `ScanScheduler` to trigger one scan cycle.
///
/// Carries no data: the `ScanRunner` reads the persisted cursor and the
/// current config at the start of each cycle.
#[derive(Debug, Clone, Copy)]
pub struct ScanTick;
