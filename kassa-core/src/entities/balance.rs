use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;

/// A user's balance row: spendable funds plus funds held against open
/// payment requests. Both columns are kept non-negative by CHECK constraints.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserBalance {
    pub user_id: i64,
    pub available_balance: Decimal,
    pub frozen_balance: Decimal,
    pub updated_at: time::PrimitiveDateTime,
}

impl UserBalance {
    pub async fn get(
        pool: &sqlx::PgPool,
        user_id: i64,
    ) -> Result<Option<UserBalance>, sqlx::Error> {
        sqlx::query_as::<_, UserBalance>(r#"SELECT * FROM user_balances WHERE user_id = $1"#)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Credit `amount` to the user's available balance within a transaction.
    ///
    /// Upserts so first-time depositors get a row implicitly. Only the
    /// settlement path (matcher / manual admin confirm) calls this, and always
    /// inside the same transaction as the deposit's status CAS, so a deposit
    /// is credited at most once.
    pub async fn credit_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: i64,
        amount: Decimal,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO user_balances (user_id, available_balance)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE
            SET available_balance = user_balances.available_balance + EXCLUDED.available_balance,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Move `amount` from available to frozen (open payment request).
    ///
    /// Returns whether the update applied; false means insufficient funds.
    pub async fn freeze(
        pool: &sqlx::PgPool,
        user_id: i64,
        amount: Decimal,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE user_balances
            SET available_balance = available_balance - $2,
                frozen_balance = frozen_balance + $2,
                updated_at = NOW()
            WHERE user_id = $1 AND available_balance >= $2
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move `amount` back from frozen to available (payment cancelled).
    pub async fn unfreeze(
        pool: &sqlx::PgPool,
        user_id: i64,
        amount: Decimal,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE user_balances
            SET available_balance = available_balance + $2,
                frozen_balance = frozen_balance - $2,
                updated_at = NOW()
            WHERE user_id = $1 AND frozen_balance >= $2
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, Clone)]
/// Get one user's balance row.
pub struct GetUserBalance {
    pub user_id: i64,
}

impl Processor<GetUserBalance> for DatabaseProcessor {
    type Output = Option<UserBalance>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetUserBalance")]
    async fn process(&self, query: GetUserBalance) -> Result<Option<UserBalance>, sqlx::Error> {
        UserBalance::get(&self.pool, query.user_id).await
    }
}
