pub mod scan_interval;
pub mod usdt;

/// Current UTC wall clock as a `PrimitiveDateTime` for database columns.
pub fn now_utc() -> time::PrimitiveDateTime {
    let now = time::OffsetDateTime::now_utc();
    time::PrimitiveDateTime::new(now.date(), now.time())
}
