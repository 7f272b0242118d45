use sqlx::PgPool;

/// Pool-backed executor for the read-side query processors.
///
/// API handlers construct this around the shared pool and dispatch query
/// structs through `kanau::processor::Processor` implementations.
pub struct DatabaseProcessor {
    pub pool: PgPool,
}
