//! Application state shared across all request handlers.

use kassa_core::config::SharedConfig;
use kassa_core::events::EventSenders;
use sqlx::PgPool;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Runtime configuration (can be reloaded via SIGHUP).
    pub config: SharedConfig,
    /// Senders for events into the settlement pipeline.
    pub event_senders: EventSenders,
}

impl AppState {
    /// Create a new AppState.
    pub fn new(db: PgPool, config: SharedConfig, event_senders: EventSenders) -> Self {
        Self {
            db,
            config,
            event_senders,
        }
    }
}
