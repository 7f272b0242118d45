use crate::entities::TransferStatus;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TronTransfer {
    pub id: i64,
    pub from_address: String,
    pub to_address: String,
    pub txn_hash: String,
    pub value: Decimal,
    pub block_number: i64,
    pub block_timestamp: i64,
    pub status: TransferStatus,
    pub deposit_id: Option<Uuid>,
    pub created_at: time::PrimitiveDateTime,
}

/// Data for inserting a newly observed transfer.
#[derive(Debug, Clone)]
pub struct TronTransferInsert {
    pub from_address: String,
    pub to_address: String,
    pub txn_hash: String,
    pub value: Decimal,
    pub block_number: i64,
    pub block_timestamp: i64,
}

impl TronTransfer {
    /// Insert a new transfer. Returns the new row id, or `None` when the
    /// transaction hash was already recorded.
    ///
    /// Uses ON CONFLICT DO NOTHING so re-scans across cursor-boundary overlap
    /// are idempotent.
    pub async fn insert(
        pool: &sqlx::PgPool,
        transfer: &TronTransferInsert,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO tron_transfers
                (from_address, to_address, txn_hash, value, block_number, block_timestamp)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (txn_hash) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&transfer.from_address)
        .bind(&transfer.to_address)
        .bind(&transfer.txn_hash)
        .bind(transfer.value)
        .bind(transfer.block_number)
        .bind(transfer.block_timestamp)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_txn_hash(
        pool: &sqlx::PgPool,
        txn_hash: &str,
    ) -> Result<Option<TronTransfer>, sqlx::Error> {
        sqlx::query_as::<_, TronTransfer>(r#"SELECT * FROM tron_transfers WHERE txn_hash = $1"#)
            .bind(txn_hash)
            .fetch_optional(pool)
            .await
    }

    /// Mark a transfer as matched to a deposit within a transaction.
    pub async fn mark_matched_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        transfer_id: i64,
        deposit_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE tron_transfers
            SET status = 'matched', deposit_id = $2
            WHERE id = $1
            "#,
        )
        .bind(transfer_id)
        .bind(deposit_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Mark a transfer as matched to a deposit (pool variant, used when the
    /// deposit was already settled by an earlier attempt).
    pub async fn mark_matched(
        pool: &sqlx::PgPool,
        transfer_id: i64,
        deposit_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE tron_transfers
            SET status = 'matched', deposit_id = $2
            WHERE id = $1
            "#,
        )
        .bind(transfer_id)
        .bind(deposit_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a transfer as having no matching pending deposit. The row is kept
    /// as evidence for manual reconciliation.
    pub async fn mark_unattributed(
        pool: &sqlx::PgPool,
        transfer_id: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE tron_transfers
            SET status = 'unattributed'
            WHERE id = $1
            "#,
        )
        .bind(transfer_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a transfer that matched more than one pending deposit. This state
    /// should be unreachable while the payable-amount index holds.
    pub async fn mark_ambiguous(
        pool: &sqlx::PgPool,
        transfer_id: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE tron_transfers
            SET status = 'ambiguous'
            WHERE id = $1
            "#,
        )
        .bind(transfer_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// List transfers awaiting manual review, newest first.
pub struct ListUnattributedTransfers {
    pub limit: i64,
    pub offset: i64,
}

impl Processor<ListUnattributedTransfers> for DatabaseProcessor {
    type Output = Vec<TronTransfer>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListUnattributedTransfers")]
    async fn process(
        &self,
        query: ListUnattributedTransfers,
    ) -> Result<Vec<TronTransfer>, sqlx::Error> {
        sqlx::query_as::<_, TronTransfer>(
            r#"
            SELECT * FROM tron_transfers
            WHERE status IN ('unattributed', 'ambiguous')
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
    }
}
