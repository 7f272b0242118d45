use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;

/// The scanner's persisted cursor. A singleton row, seeded by migration.
///
/// Read once at the start of each scan cycle, written once after the cycle
/// completes without unrecoverable error; never cached in memory across
/// cycles so multiple instances stay consistent.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TronScanState {
    pub last_processed_block: i64,
    pub last_processed_at: i64,
    pub last_successful_scan: Option<time::PrimitiveDateTime>,
}

impl TronScanState {
    pub async fn load(pool: &sqlx::PgPool) -> Result<TronScanState, sqlx::Error> {
        sqlx::query_as::<_, TronScanState>(
            r#"
            SELECT last_processed_block, last_processed_at, last_successful_scan
            FROM tron_scan_state
            WHERE id
            "#,
        )
        .fetch_one(pool)
        .await
    }

    /// Advance the cursor after a successful scan cycle.
    pub async fn advance(
        pool: &sqlx::PgPool,
        last_processed_block: i64,
        last_processed_at: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE tron_scan_state
            SET last_processed_block = $1,
                last_processed_at = $2,
                last_successful_scan = NOW()
            WHERE id
            "#,
        )
        .bind(last_processed_block)
        .bind(last_processed_at)
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Read the scanner cursor (ops visibility).
pub struct GetScanState;

impl Processor<GetScanState> for DatabaseProcessor {
    type Output = TronScanState;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetScanState")]
    async fn process(&self, _query: GetScanState) -> Result<TronScanState, sqlx::Error> {
        TronScanState::load(&self.pool).await
    }
}
