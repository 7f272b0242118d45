//! Background processors of the settlement pipeline.
//!
//! - [`scan_scheduler`]: adaptive timer emitting `ScanTick` events
//! - [`chain_scanner`]: per-tick indexer poll, cursor management
//! - [`transfer_matcher`]: attribution of observed transfers to deposits
//! - [`expiry_sweeper`]: periodic expiry of stale pending deposits
//!
//! All processors synchronize exclusively through the database (conditional
//! updates and unique constraints), never through in-process locks, so
//! multiple server instances can run side by side.

pub mod chain_scanner;
pub mod expiry_sweeper;
pub mod scan_scheduler;
pub mod transfer_matcher;

pub use chain_scanner::{ChainScanner, ScanError, ScanRunner, TronIndexer, TronScanIndexer};
pub use expiry_sweeper::ExpirySweeper;
pub use scan_scheduler::ScanScheduler;
pub use transfer_matcher::{IncomingTransfer, MatchError, MatchOutcome, TransferMatcher};
