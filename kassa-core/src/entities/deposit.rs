use crate::entities::DepositStatus;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Deposit {
    pub id: Uuid,
    pub user_id: i64,
    pub requested_amount: Decimal,
    pub payable_amount: Decimal,
    pub amount: Option<Decimal>,
    pub wallet_address: String,
    pub status: DepositStatus,
    pub expires_at: time::PrimitiveDateTime,
    pub txn_hash: Option<String>,
    pub confirmed_at: Option<time::PrimitiveDateTime>,
    pub confirmed_by: Option<String>,
    pub reject_reason: Option<String>,
    pub created_at: time::PrimitiveDateTime,
}

/// Data for inserting a new pending deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositInsert {
    pub user_id: i64,
    pub requested_amount: Decimal,
    pub payable_amount: Decimal,
    pub wallet_address: String,
    pub expires_at: time::PrimitiveDateTime,
}

/// A deposit that was just expired by the sweeper, for logging.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExpiredDeposit {
    pub id: Uuid,
    pub user_id: i64,
    pub payable_amount: Decimal,
}

impl Deposit {
    /// Insert a new pending deposit row.
    ///
    /// The partial unique index on `payable_amount` (scoped to pending rows)
    /// is the authoritative collision check; a violation surfaces as a
    /// database error with the index name as the constraint.
    pub async fn insert_pending(
        pool: &sqlx::PgPool,
        insert: &DepositInsert,
    ) -> Result<Deposit, sqlx::Error> {
        sqlx::query_as::<_, Deposit>(
            r#"
            INSERT INTO deposits
                (id, user_id, requested_amount, payable_amount, wallet_address, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(insert.user_id)
        .bind(insert.requested_amount)
        .bind(insert.payable_amount)
        .bind(&insert.wallet_address)
        .bind(insert.expires_at)
        .fetch_one(pool)
        .await
    }

    pub async fn get_by_id(
        pool: &sqlx::PgPool,
        id: Uuid,
    ) -> Result<Option<Deposit>, sqlx::Error> {
        sqlx::query_as::<_, Deposit>(r#"SELECT * FROM deposits WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Pending deposits holding exactly this payable amount.
    ///
    /// The partial unique index guarantees at most one row, but the matcher
    /// fetches all of them so a broken invariant is detected instead of
    /// silently picking a winner.
    pub async fn find_pending_by_payable(
        pool: &sqlx::PgPool,
        payable_amount: Decimal,
    ) -> Result<Vec<Deposit>, sqlx::Error> {
        sqlx::query_as::<_, Deposit>(
            r#"
            SELECT * FROM deposits
            WHERE status = 'pending' AND payable_amount = $1
            "#,
        )
        .bind(payable_amount)
        .fetch_all(pool)
        .await
    }

    /// The confirmed deposit already holding this transaction hash, if any.
    pub async fn find_confirmed_by_txn_hash(
        pool: &sqlx::PgPool,
        txn_hash: &str,
    ) -> Result<Option<Deposit>, sqlx::Error> {
        sqlx::query_as::<_, Deposit>(
            r#"
            SELECT * FROM deposits
            WHERE status = 'confirmed' AND txn_hash = $1
            "#,
        )
        .bind(txn_hash)
        .fetch_optional(pool)
        .await
    }

    pub async fn count_pending_for_user(
        pool: &sqlx::PgPool,
        user_id: i64,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM deposits
            WHERE user_id = $1 AND status = 'pending'
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Confirm a deposit within a transaction, but only if it is still pending.
    ///
    /// Returns whether the update applied. The `status = 'pending'` predicate
    /// is the compare-and-swap that resolves races between the matcher, the
    /// sweeper and manual admin confirmation: exactly one of them wins.
    pub async fn confirm_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: Uuid,
        actual_amount: Decimal,
        txn_hash: &str,
        confirmed_by: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE deposits
            SET status = 'confirmed',
                amount = $2,
                txn_hash = $3,
                confirmed_at = NOW(),
                confirmed_by = $4
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .bind(actual_amount)
        .bind(txn_hash)
        .bind(confirmed_by)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Cancel a pending deposit on behalf of its owner.
    ///
    /// Returns whether the update applied (false when the deposit does not
    /// exist, belongs to another user, or already left pending).
    pub async fn cancel(
        pool: &sqlx::PgPool,
        id: Uuid,
        user_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE deposits
            SET status = 'cancelled'
            WHERE id = $1 AND user_id = $2 AND status = 'pending'
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reject a pending deposit (admin action). Returns whether it applied.
    pub async fn reject(
        pool: &sqlx::PgPool,
        id: Uuid,
        reason: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE deposits
            SET status = 'rejected', reject_reason = $2
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .bind(reason)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Expire every pending deposit whose window has passed.
    ///
    /// Idempotent: already-expired rows no longer match the predicate. The
    /// expired rows drop out of the partial unique index, so their payable
    /// amounts are immediately reusable.
    pub async fn expire_due(
        pool: &sqlx::PgPool,
        now: time::PrimitiveDateTime,
    ) -> Result<Vec<ExpiredDeposit>, sqlx::Error> {
        sqlx::query_as::<_, ExpiredDeposit>(
            r#"
            UPDATE deposits
            SET status = 'expired'
            WHERE status = 'pending' AND expires_at < $1
            RETURNING id, user_id, payable_amount
            "#,
        )
        .bind(now)
        .fetch_all(pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// Get a deposit by id.
pub struct GetDepositById {
    pub id: Uuid,
}

impl Processor<GetDepositById> for DatabaseProcessor {
    type Output = Option<Deposit>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetDepositById")]
    async fn process(&self, query: GetDepositById) -> Result<Option<Deposit>, sqlx::Error> {
        Deposit::get_by_id(&self.pool, query.id).await
    }
}

#[derive(Debug, Clone)]
/// List all deposits of one user, newest first.
pub struct ListDepositsForUser {
    pub user_id: i64,
}

impl Processor<ListDepositsForUser> for DatabaseProcessor {
    type Output = Vec<Deposit>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListDepositsForUser")]
    async fn process(&self, query: ListDepositsForUser) -> Result<Vec<Deposit>, sqlx::Error> {
        sqlx::query_as::<_, Deposit>(
            r#"
            SELECT * FROM deposits
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(query.user_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// List deposits across all users with pagination and an optional status filter.
pub struct ListDeposits {
    pub limit: i64,
    pub offset: i64,
    pub status: Option<DepositStatus>,
}

impl Processor<ListDeposits> for DatabaseProcessor {
    type Output = Vec<Deposit>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListDeposits")]
    async fn process(&self, query: ListDeposits) -> Result<Vec<Deposit>, sqlx::Error> {
        match query.status {
            Some(status) => {
                sqlx::query_as::<_, Deposit>(
                    r#"
                    SELECT * FROM deposits
                    WHERE status = $3
                    ORDER BY created_at DESC
                    LIMIT $1 OFFSET $2
                    "#,
                )
                .bind(query.limit)
                .bind(query.offset)
                .bind(status)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Deposit>(
                    r#"
                    SELECT * FROM deposits
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
    }
}
